// src/models/basket.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Upper bound on a single line's quantity.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// One `(user, food)` accumulator. Quantity is always in `1..=MAX_LINE_QUANTITY`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BasketLine {
  pub id: i64,
  pub user_id: i64,
  pub food_id: i64,
  pub quantity: i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A basket line joined with the food it references, priced at the current catalog price.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedBasketLine {
  pub line_id: i64,
  pub food_id: i64,
  pub name: String,
  pub category: String,
  pub image: Option<String>,
  pub unit_price_cents: i64,
  pub quantity: i64,
  pub line_total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedBasket {
  pub user_id: i64,
  pub lines: Vec<DetailedBasketLine>,
  pub total_price_cents: i64,
}
