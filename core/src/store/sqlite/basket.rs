// src/store/sqlite/basket.rs

use crate::error::{Error, Result};
use crate::models::{BasketLine, MAX_LINE_QUANTITY};
use crate::store::BasketStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const LINE_COLUMNS: &str = "id, user_id, food_id, quantity, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteBasketStore {
  pool: SqlitePool,
}

impl SqliteBasketStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BasketStore for SqliteBasketStore {
  async fn add_or_increment(&self, user_id: i64, food_id: i64) -> Result<BasketLine> {
    let now = Utc::now();
    // The UNIQUE (user_id, food_id) index serializes concurrent adds of the same pair.
    // A line already at the cap matches no row, so nothing is returned.
    let sql = format!(
      "INSERT INTO basket_lines (user_id, food_id, quantity, created_at, updated_at) \
       VALUES (?, ?, 1, ?, ?) \
       ON CONFLICT (user_id, food_id) DO UPDATE SET \
         quantity = basket_lines.quantity + 1, \
         updated_at = excluded.updated_at \
       WHERE basket_lines.quantity < ? \
       RETURNING {LINE_COLUMNS}"
    );
    sqlx::query_as::<_, BasketLine>(&sql)
      .bind(user_id)
      .bind(food_id)
      .bind(now)
      .bind(now)
      .bind(MAX_LINE_QUANTITY)
      .fetch_optional(&self.pool)
      .await?
      .ok_or_else(|| Error::validation(format!("Quantity cannot exceed {}", MAX_LINE_QUANTITY)))
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<BasketLine>> {
    let sql = format!("SELECT {LINE_COLUMNS} FROM basket_lines WHERE user_id = ? ORDER BY created_at DESC, id DESC");
    Ok(sqlx::query_as::<_, BasketLine>(&sql).bind(user_id).fetch_all(&self.pool).await?)
  }

  async fn remove(&self, user_id: i64, food_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM basket_lines WHERE user_id = ? AND food_id = ?")
      .bind(user_id)
      .bind(food_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn set_quantity(&self, user_id: i64, food_id: i64, quantity: i64) -> Result<Option<BasketLine>> {
    let sql = format!(
      "UPDATE basket_lines SET quantity = ?, updated_at = ? \
       WHERE user_id = ? AND food_id = ? RETURNING {LINE_COLUMNS}"
    );
    let line = sqlx::query_as::<_, BasketLine>(&sql)
      .bind(quantity)
      .bind(Utc::now())
      .bind(user_id)
      .bind(food_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(line)
  }

  async fn clear(&self, user_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM basket_lines WHERE user_id = ?")
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }
}
