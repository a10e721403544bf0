// src/services/order_service.rs

use crate::error::{Error, Result};
use crate::models::{CreateOrderRequest, CreatedOrder, Order, OrderDetails, OrderStatus, UserOrders};
use crate::pipeline::{ContextData, Pipeline, PipelineError, PipelineResult};
use crate::store::{BasketStore, FoodStore, OrderStore};
use crate::tables::TableRegistry;
use crate::workflows::create_order_pipeline::ASSEMBLE_ORDER_DETAILS;
use crate::workflows::{build_create_order_pipeline, CreateOrderCtxData, OrderDeps};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Order lifecycle operations. Creation runs the `create_order` pipeline,
/// built once per service.
#[derive(Clone)]
pub struct OrderService {
  deps: OrderDeps,
  create_order_pipeline: Arc<Pipeline<CreateOrderCtxData, Error>>,
}

impl OrderService {
  pub fn new(
    foods: Arc<dyn FoodStore>,
    baskets: Arc<dyn BasketStore>,
    orders: Arc<dyn OrderStore>,
    tables: Arc<TableRegistry>,
  ) -> Self {
    Self {
      deps: OrderDeps {
        foods,
        baskets,
        orders,
        tables,
      },
      create_order_pipeline: Arc::new(build_create_order_pipeline()),
    }
  }

  /// Turns the user's basket into an order. The basket-clear step is allowed
  /// to fail; check [`CreatedOrder::basket_cleared`].
  #[instrument(
    name = "order::create",
    skip(self, request),
    fields(delivery_type = %request.delivery_type)
  )]
  pub async fn create_order(&self, user_id: i64, request: CreateOrderRequest) -> Result<CreatedOrder> {
    let ctx_data = ContextData::new(CreateOrderCtxData::new(self.deps.clone(), user_id, request));

    match self.create_order_pipeline.run(ctx_data.clone()).await? {
      PipelineResult::Completed => {}
      PipelineResult::Stopped => {
        warn!("Create order pipeline was stopped before completing.");
        return Err(Error::Internal("Order creation was halted".to_string()));
      }
    }

    let guard = ctx_data.read();
    let details = guard.details.clone().ok_or_else(|| PipelineError::MissingOutput {
      step_name: ASSEMBLE_ORDER_DETAILS.to_string(),
      missing: "order details",
    })?;
    info!(
      order_id = details.order.id,
      basket_cleared = guard.basket_cleared,
      "Order created."
    );
    Ok(CreatedOrder {
      details,
      basket_cleared: guard.basket_cleared,
    })
  }

  pub async fn get_order_details(&self, order_id: i64) -> Result<OrderDetails> {
    let order = self
      .deps
      .orders
      .get(order_id)
      .await?
      .ok_or_else(|| Error::not_found(format!("order {}", order_id)))?;
    let items = self.deps.orders.items_for(order_id).await?;
    Ok(OrderDetails { order, items })
  }

  /// Like [`Self::get_order_details`], but an order placed by someone else is
  /// reported as `NotFound`.
  pub async fn get_order_details_for_user(&self, order_id: i64, user_id: i64) -> Result<OrderDetails> {
    let details = self.get_order_details(order_id).await?;
    if details.order.user_id != user_id {
      return Err(Error::not_found(format!("order {}", order_id)));
    }
    Ok(details)
  }

  /// All of the user's orders, newest first. An order whose items cannot be
  /// read is skipped and reported in `skipped_order_ids`.
  #[instrument(name = "order::list_for_user", skip(self))]
  pub async fn get_user_orders(&self, user_id: i64) -> Result<UserOrders> {
    let orders = self.deps.orders.list_by_user(user_id).await?;
    let mut result = UserOrders {
      orders: Vec::with_capacity(orders.len()),
      skipped_order_ids: Vec::new(),
    };

    for order in orders {
      match self.deps.orders.items_for(order.id).await {
        Ok(items) => result.orders.push(OrderDetails { order, items }),
        Err(e) => {
          warn!(order_id = order.id, error = %e, "Skipping order whose items could not be loaded.");
          result.skipped_order_ids.push(order.id);
        }
      }
    }
    Ok(result)
  }

  /// Sets any listed status; there is no adjacency check between statuses.
  #[instrument(name = "order::update_status", skip(self))]
  pub async fn update_order_status(&self, order_id: i64, status: &str) -> Result<Order> {
    let status: OrderStatus = status.parse()?;
    let order = self
      .deps
      .orders
      .update_status(order_id, status)
      .await?
      .ok_or_else(|| Error::not_found(format!("order {}", order_id)))?;
    info!(%status, "Order status updated.");
    Ok(order)
  }

  /// Hard delete; items go with the order.
  #[instrument(name = "order::delete_admin", skip(self))]
  pub async fn delete_order_admin(&self, order_id: i64) -> Result<()> {
    if !self.deps.orders.delete(order_id).await? {
      return Err(Error::not_found(format!("order {}", order_id)));
    }
    info!("Order deleted.");
    Ok(())
  }

  pub async fn order_count(&self) -> Result<i64> {
    self.deps.orders.count().await
  }
}
