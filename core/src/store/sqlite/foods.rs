// src/store/sqlite/foods.rs

use crate::error::Result;
use crate::models::{Food, FoodChanges, NewFood};
use crate::store::FoodStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const FOOD_COLUMNS: &str = "id, name, category, price_cents, image, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteFoodStore {
  pool: SqlitePool,
}

impl SqliteFoodStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl FoodStore for SqliteFoodStore {
  async fn insert(&self, food: &NewFood) -> Result<Food> {
    let now = Utc::now();
    let sql = format!(
      "INSERT INTO foods (name, category, price_cents, image, created_at, updated_at) \
       VALUES (?, ?, ?, ?, ?, ?) RETURNING {FOOD_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Food>(&sql)
      .bind(&food.name)
      .bind(&food.category)
      .bind(food.price_cents)
      .bind(&food.image)
      .bind(now)
      .bind(now)
      .fetch_one(&self.pool)
      .await?;
    Ok(created)
  }

  async fn list(&self) -> Result<Vec<Food>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM foods ORDER BY created_at DESC, id DESC");
    Ok(sqlx::query_as::<_, Food>(&sql).fetch_all(&self.pool).await?)
  }

  async fn get(&self, id: i64) -> Result<Option<Food>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = ?");
    Ok(sqlx::query_as::<_, Food>(&sql).bind(id).fetch_optional(&self.pool).await?)
  }

  async fn list_by_category(&self, category: &str) -> Result<Vec<Food>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE category = ? ORDER BY created_at DESC, id DESC");
    Ok(sqlx::query_as::<_, Food>(&sql).bind(category).fetch_all(&self.pool).await?)
  }

  async fn update(&self, id: i64, changes: &FoodChanges) -> Result<Option<Food>> {
    let sql = format!(
      "UPDATE foods SET \
         name = COALESCE(?, name), \
         category = COALESCE(?, category), \
         price_cents = COALESCE(?, price_cents), \
         image = COALESCE(?, image), \
         updated_at = ? \
       WHERE id = ? RETURNING {FOOD_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Food>(&sql)
      .bind(&changes.name)
      .bind(&changes.category)
      .bind(changes.price_cents)
      .bind(&changes.image)
      .bind(Utc::now())
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(updated)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM foods WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn count(&self) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM foods").fetch_one(&self.pool).await?)
  }
}
