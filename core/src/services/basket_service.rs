// src/services/basket_service.rs

use crate::error::{Error, Result};
use crate::models::{BasketLine, DetailedBasket, DetailedBasketLine, MAX_LINE_QUANTITY};
use crate::store::{BasketStore, FoodStore};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct BasketService {
  baskets: Arc<dyn BasketStore>,
  foods: Arc<dyn FoodStore>,
}

impl BasketService {
  pub fn new(baskets: Arc<dyn BasketStore>, foods: Arc<dyn FoodStore>) -> Self {
    Self { baskets, foods }
  }

  /// Adds one unit of `food_id`. A repeat add increments the existing line;
  /// a line already at [`MAX_LINE_QUANTITY`] is a `Validation` error.
  #[instrument(name = "basket::add", skip(self))]
  pub async fn add_to_basket(&self, user_id: i64, food_id: i64) -> Result<BasketLine> {
    if self.foods.get(food_id).await?.is_none() {
      return Err(Error::FoodNotFound(food_id));
    }
    let line = self.baskets.add_or_increment(user_id, food_id).await?;
    debug!(quantity = line.quantity, "Basket line upserted.");
    Ok(line)
  }

  pub async fn list_basket(&self, user_id: i64) -> Result<Vec<BasketLine>> {
    self.baskets.list_by_user(user_id).await
  }

  /// Basket lines joined with their foods at current catalog prices.
  /// Lines whose food has vanished are left out.
  #[instrument(name = "basket::detailed", skip(self))]
  pub async fn detailed_basket(&self, user_id: i64) -> Result<DetailedBasket> {
    let lines = self.baskets.list_by_user(user_id).await?;
    let mut detailed = Vec::with_capacity(lines.len());
    let mut total_price_cents: i64 = 0;

    for line in lines {
      let Some(food) = self.foods.get(line.food_id).await? else {
        warn!(food_id = line.food_id, "Basket line references a missing food, skipping.");
        continue;
      };
      let line_total_cents = checked_line_total(food.price_cents, line.quantity)?;
      total_price_cents = total_price_cents
        .checked_add(line_total_cents)
        .ok_or_else(|| Error::validation("Basket total is too large"))?;
      detailed.push(DetailedBasketLine {
        line_id: line.id,
        food_id: food.id,
        name: food.name,
        category: food.category,
        image: food.image,
        unit_price_cents: food.price_cents,
        quantity: line.quantity,
        line_total_cents,
      });
    }

    Ok(DetailedBasket {
      user_id,
      lines: detailed,
      total_price_cents,
    })
  }

  /// Sets an exact quantity. Zero or less removes the line and yields `None`;
  /// more than [`MAX_LINE_QUANTITY`] is a `Validation` error.
  #[instrument(name = "basket::set_quantity", skip(self))]
  pub async fn set_quantity(&self, user_id: i64, food_id: i64, quantity: i64) -> Result<Option<BasketLine>> {
    if quantity > MAX_LINE_QUANTITY {
      return Err(Error::validation(format!("Quantity cannot exceed {}", MAX_LINE_QUANTITY)));
    }
    if quantity <= 0 {
      self.remove(user_id, food_id).await?;
      return Ok(None);
    }
    self
      .baskets
      .set_quantity(user_id, food_id, quantity)
      .await?
      .map(Some)
      .ok_or_else(|| Error::not_found(format!("basket line for food {}", food_id)))
  }

  #[instrument(name = "basket::remove", skip(self))]
  pub async fn remove(&self, user_id: i64, food_id: i64) -> Result<()> {
    if self.baskets.remove(user_id, food_id).await? {
      Ok(())
    } else {
      Err(Error::not_found(format!("basket line for food {}", food_id)))
    }
  }

  /// Idempotent; returns how many lines were removed.
  pub async fn clear(&self, user_id: i64) -> Result<u64> {
    self.baskets.clear(user_id).await
  }
}

pub(crate) fn checked_line_total(price_cents: i64, quantity: i64) -> Result<i64> {
  price_cents
    .checked_mul(quantity)
    .ok_or_else(|| Error::validation("Line total is too large"))
}
