// src/workflows/contexts.rs

use crate::models::{BasketLine, CreateOrderRequest, DeliveryType, NewOrderItem, OrderDetails, Placement};
use crate::store::{BasketStore, FoodStore, OrderStore};
use crate::tables::TableRegistry;
use std::sync::Arc;

/// Collaborators the order workflow steps need.
#[derive(Clone)]
pub struct OrderDeps {
  pub foods: Arc<dyn FoodStore>,
  pub baskets: Arc<dyn BasketStore>,
  pub orders: Arc<dyn OrderStore>,
  pub tables: Arc<TableRegistry>,
}

/// State threaded through the `create_order` pipeline. Each step fills in
/// the fields the next one reads.
#[derive(Clone)]
pub struct CreateOrderCtxData {
  pub deps: OrderDeps,
  pub user_id: i64,
  pub request: CreateOrderRequest,

  // load_basket
  pub basket_lines: Vec<BasketLine>,

  // price_basket_lines
  pub priced_items: Vec<NewOrderItem>,
  pub total_price_cents: i64,

  // resolve_delivery
  pub delivery_type: Option<DeliveryType>,
  pub placement: Option<Placement>,
  pub comment: Option<String>,

  // persist_order
  pub order_id: Option<i64>,

  // clear_basket
  pub basket_cleared: bool,

  // assemble_order_details
  pub details: Option<OrderDetails>,
}

impl CreateOrderCtxData {
  pub fn new(deps: OrderDeps, user_id: i64, request: CreateOrderRequest) -> Self {
    Self {
      deps,
      user_id,
      request,
      basket_lines: Vec::new(),
      priced_items: Vec::new(),
      total_price_cents: 0,
      delivery_type: None,
      placement: None,
      comment: None,
      order_id: None,
      basket_cleared: false,
      details: None,
    }
  }
}

impl std::fmt::Debug for CreateOrderCtxData {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CreateOrderCtxData")
      .field("user_id", &self.user_id)
      .field("request", &self.request)
      .field("basket_lines", &self.basket_lines.len())
      .field("total_price_cents", &self.total_price_cents)
      .field("order_id", &self.order_id)
      .field("basket_cleared", &self.basket_cleared)
      .finish_non_exhaustive()
  }
}
