// src/workflows/create_order_pipeline.rs

//! Basket -> order conversion as a pipeline of named steps:
//!
//! 1. `load_basket`: refuse empty baskets.
//! 2. `price_basket_lines`: snapshot current catalog prices into order items.
//! 3. `resolve_delivery`: per-delivery-type validation, producing a [`Placement`].
//! 4. `persist_order`: order row and items in one transaction.
//! 5. `clear_basket`: best effort; a failure is recorded, not raised.
//! 6. `assemble_order_details`: re-read what was stored.
//!
//! Nothing is written before step 4, so every validation failure leaves the
//! store untouched.

use crate::error::{Error, Result};
use crate::models::{CreateOrderRequest, DeliveryType, NewOrder, NewOrderItem, OrderDetails, Placement};
use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineError};
use crate::services::basket_service::checked_line_total;
use crate::tables::TableRegistry;
use crate::workflows::contexts::CreateOrderCtxData;
use tracing::{debug, info, warn};

pub const LOAD_BASKET: &str = "load_basket";
pub const PRICE_BASKET_LINES: &str = "price_basket_lines";
pub const RESOLVE_DELIVERY: &str = "resolve_delivery";
pub const PERSIST_ORDER: &str = "persist_order";
pub const CLEAR_BASKET: &str = "clear_basket";
pub const ASSEMBLE_ORDER_DETAILS: &str = "assemble_order_details";

pub fn build_create_order_pipeline() -> Pipeline<CreateOrderCtxData, Error> {
  let mut p = Pipeline::<CreateOrderCtxData, Error>::new(&[
    (LOAD_BASKET, false),
    (PRICE_BASKET_LINES, false),
    (RESOLVE_DELIVERY, false),
    (PERSIST_ORDER, false),
    (CLEAR_BASKET, false),
    (ASSEMBLE_ORDER_DETAILS, false),
  ]);

  // Step 1: Load basket
  p.on_root(LOAD_BASKET, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let (baskets, user_id) = {
        let guard = ctx_data.read();
        (guard.deps.baskets.clone(), guard.user_id)
      };

      let lines = baskets.list_by_user(user_id).await?;
      if lines.is_empty() {
        warn!(user_id, "Create Order Pipeline: basket is empty.");
        return Err(Error::EmptyBasket);
      }

      debug!(user_id, lines = lines.len(), "Create Order Pipeline: basket loaded.");
      ctx_data.write().basket_lines = lines;
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  // Step 2: Price every line at the current catalog price
  p.on_root(PRICE_BASKET_LINES, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let (foods, lines) = {
        let guard = ctx_data.read();
        (guard.deps.foods.clone(), guard.basket_lines.clone())
      };

      let mut items = Vec::with_capacity(lines.len());
      let mut total_price_cents: i64 = 0;
      for line in &lines {
        let food = foods.get(line.food_id).await?.ok_or_else(|| {
          warn!(food_id = line.food_id, "Create Order Pipeline: basket references a missing food.");
          Error::FoodNotFound(line.food_id)
        })?;

        let subtotal = checked_line_total(food.price_cents, line.quantity)?;
        total_price_cents = total_price_cents
          .checked_add(subtotal)
          .ok_or_else(|| Error::validation("Order total is too large"))?;
        items.push(NewOrderItem {
          food_id: food.id,
          quantity: line.quantity,
          item_price_cents: food.price_cents,
        });
      }

      debug!(total_price_cents, items = items.len(), "Create Order Pipeline: basket priced.");
      {
        let mut guard = ctx_data.write();
        guard.priced_items = items;
        guard.total_price_cents = total_price_cents;
      }
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  // Step 3: Delivery-type validation
  p.on_root(RESOLVE_DELIVERY, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let delivery_type = guard.request.delivery_type.parse::<DeliveryType>()?;
      let placement = resolve_placement(delivery_type, &guard.request, &guard.deps.tables)?;
      let comment = normalize_comment(guard.request.comment.as_deref());

      debug!(%delivery_type, table = ?placement.table_name, "Create Order Pipeline: delivery resolved.");
      guard.delivery_type = Some(delivery_type);
      guard.placement = Some(placement);
      guard.comment = comment;
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  // Step 4: Persist order + items atomically
  p.on_root(PERSIST_ORDER, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let (orders, new_order, items) = {
        let guard = ctx_data.read();
        let delivery_type = guard.delivery_type.ok_or_else(|| missing(RESOLVE_DELIVERY, "delivery type"))?;
        let placement = guard.placement.clone().ok_or_else(|| missing(RESOLVE_DELIVERY, "placement"))?;
        let new_order = NewOrder {
          user_id: guard.user_id,
          delivery_type,
          total_price_cents: guard.total_price_cents,
          placement,
          comment: guard.comment.clone(),
        };
        (guard.deps.orders.clone(), new_order, guard.priced_items.clone())
      };

      let order_id = orders.create_with_items(&new_order, &items).await?;
      info!(
        order_id,
        user_id = new_order.user_id,
        total_price_cents = new_order.total_price_cents,
        "Create Order Pipeline: order persisted."
      );
      ctx_data.write().order_id = Some(order_id);
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  // Step 5: Clear basket. The order is already durable, so failure only degrades the result.
  p.on_root(CLEAR_BASKET, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let (baskets, user_id, order_id) = {
        let guard = ctx_data.read();
        (guard.deps.baskets.clone(), guard.user_id, guard.order_id)
      };

      let cleared = match baskets.clear(user_id).await {
        Ok(removed) => {
          debug!(user_id, removed, "Create Order Pipeline: basket cleared.");
          true
        }
        Err(e) => {
          warn!(user_id, ?order_id, error = %e, "Create Order Pipeline: order stored but basket could not be cleared.");
          false
        }
      };
      ctx_data.write().basket_cleared = cleared;
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  // Step 6: Re-read the stored order
  p.on_root(ASSEMBLE_ORDER_DETAILS, |ctx_data: ContextData<CreateOrderCtxData>| {
    Box::pin(async move {
      let (orders, order_id) = {
        let guard = ctx_data.read();
        let order_id = guard.order_id.ok_or_else(|| missing(PERSIST_ORDER, "order id"))?;
        (guard.deps.orders.clone(), order_id)
      };

      let order = orders
        .get(order_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("order {}", order_id)))?;
      let items = orders.items_for(order_id).await?;
      ctx_data.write().details = Some(OrderDetails { order, items });
      Ok::<_, Error>(PipelineControl::Continue)
    })
  });

  p
}

fn missing(step_name: &str, what: &'static str) -> Error {
  Error::from(PipelineError::MissingOutput {
    step_name: step_name.to_string(),
    missing: what,
  })
}

/// Applies the delivery-type rules. Fields that do not belong to the chosen
/// type are dropped rather than rejected.
pub fn resolve_placement(
  delivery_type: DeliveryType,
  request: &CreateOrderRequest,
  tables: &TableRegistry,
) -> Result<Placement> {
  match delivery_type {
    DeliveryType::Deliver => {
      let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Err(Error::validation("Latitude and longitude are required for delivery orders"));
      };
      validate_coordinates(latitude, longitude)?;
      Ok(Placement {
        latitude: Some(latitude),
        longitude: Some(longitude),
        table_name: None,
      })
    }
    DeliveryType::Pickup => Ok(Placement::default()),
    DeliveryType::DineIn => {
      let token = request
        .table_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::validation("Table token is required for dine-in orders"))?;
      let table_name = tables.resolve(token)?;
      Ok(Placement {
        latitude: None,
        longitude: None,
        table_name: Some(table_name.to_string()),
      })
    }
  }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
  if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
    return Err(Error::validation(format!("Latitude {} is out of range", latitude)));
  }
  if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
    return Err(Error::validation(format!("Longitude {} is out of range", longitude)));
  }
  Ok(())
}

fn normalize_comment(comment: Option<&str>) -> Option<String> {
  comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string)
}
