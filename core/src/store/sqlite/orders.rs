// src/store/sqlite/orders.rs

use crate::error::Result;
use crate::models::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus};
use crate::store::OrderStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

const ORDER_COLUMNS: &str = "id, user_id, status, delivery_type, total_price_cents, latitude, longitude, \
                             table_name, comment, order_time, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, food_id, quantity, item_price_cents, created_at";

#[derive(Clone)]
pub struct SqliteOrderStore {
  pool: SqlitePool,
}

impl SqliteOrderStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
  async fn create_with_items(&self, order: &NewOrder, items: &[NewOrderItem]) -> Result<i64> {
    let now = Utc::now();
    let mut tx = self.pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, i64>(
      "INSERT INTO orders (user_id, status, delivery_type, total_price_cents, latitude, longitude, \
         table_name, comment, order_time, created_at, updated_at) \
       VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order.user_id)
    .bind(OrderStatus::Received)
    .bind(order.delivery_type)
    .bind(order.total_price_cents)
    .bind(order.placement.latitude)
    .bind(order.placement.longitude)
    .bind(&order.placement.table_name)
    .bind(&order.comment)
    .bind(now)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
      sqlx::query(
        "INSERT INTO order_items (order_id, food_id, quantity, item_price_cents, created_at) \
         VALUES (?, ?, ?, ?, ?)",
      )
      .bind(order_id)
      .bind(item.food_id)
      .bind(item.quantity)
      .bind(item.item_price_cents)
      .bind(now)
      .execute(&mut *tx)
      .await?;
    }

    // Dropping `tx` on any early return above rolls the whole order back.
    tx.commit().await?;
    debug!(order_id, items = items.len(), "Order and items committed.");
    Ok(order_id)
  }

  async fn get(&self, id: i64) -> Result<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    Ok(sqlx::query_as::<_, Order>(&sql).bind(id).fetch_optional(&self.pool).await?)
  }

  async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id");
    Ok(sqlx::query_as::<_, OrderItem>(&sql).bind(order_id).fetch_all(&self.pool).await?)
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC");
    Ok(sqlx::query_as::<_, Order>(&sql).bind(user_id).fetch_all(&self.pool).await?)
  }

  async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>> {
    let sql = format!("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? RETURNING {ORDER_COLUMNS}");
    let updated = sqlx::query_as::<_, Order>(&sql)
      .bind(status)
      .bind(Utc::now())
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(updated)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn count(&self) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders").fetch_one(&self.pool).await?)
  }
}
