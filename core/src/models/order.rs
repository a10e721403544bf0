// src/models/order.rs

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle: `received -> preparing -> ready -> delivered`, with `cancelled` terminal.
/// Only membership is checked on update; any listed status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Received,
  Preparing,
  Ready,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Received,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Received => "received",
      OrderStatus::Preparing => "preparing",
      OrderStatus::Ready => "ready",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| {
        Error::Validation(format!(
          "Invalid order status '{}'. Expected one of: received, preparing, ready, delivered, cancelled",
          s
        ))
      })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryType {
  /// Courier delivery to a geo-location.
  Deliver,
  Pickup,
  /// Served in the hall at a table identified by its QR token.
  DineIn,
}

impl DeliveryType {
  pub fn as_str(&self) -> &'static str {
    match self {
      DeliveryType::Deliver => "deliver",
      DeliveryType::Pickup => "pickup",
      DeliveryType::DineIn => "dine-in",
    }
  }
}

impl fmt::Display for DeliveryType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for DeliveryType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "deliver" => Ok(DeliveryType::Deliver),
      "pickup" => Ok(DeliveryType::Pickup),
      "dine-in" => Ok(DeliveryType::DineIn),
      _ => Err(Error::Validation(format!(
        "Invalid delivery type '{}'. Expected one of: deliver, pickup, dine-in",
        s
      ))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub user_id: i64,
  pub status: OrderStatus,
  pub delivery_type: DeliveryType,
  /// Sum of item price times quantity at creation. Never recomputed.
  pub total_price_cents: i64,
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub table_name: Option<String>,
  pub comment: Option<String>,
  pub order_time: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub food_id: i64,
  pub quantity: i64,
  /// Catalog price captured when the order was created.
  pub item_price_cents: i64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
  pub order: Order,
  pub items: Vec<OrderItem>,
}

/// Where the order ends up. Exactly one shape is populated per delivery type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub table_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
  pub food_id: i64,
  pub quantity: i64,
  pub item_price_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
  pub user_id: i64,
  pub delivery_type: DeliveryType,
  pub total_price_cents: i64,
  pub placement: Placement,
  pub comment: Option<String>,
}

/// Input of order creation. `delivery_type` is kept as text so an unknown
/// value surfaces as a validation error from the workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
  pub delivery_type: String,
  #[serde(default)]
  pub latitude: Option<f64>,
  #[serde(default)]
  pub longitude: Option<f64>,
  #[serde(default)]
  pub table_token: Option<String>,
  #[serde(default)]
  pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrder {
  #[serde(flatten)]
  pub details: OrderDetails,
  /// `false` when the order was stored but the basket could not be emptied.
  pub basket_cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserOrders {
  pub orders: Vec<OrderDetails>,
  /// Orders left out because their items could not be read.
  pub skipped_order_ids: Vec<i64>,
}
