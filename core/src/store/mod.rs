// src/store/mod.rs

//! Persistence seams. Services only see these traits, so tests can wrap the
//! SQLite stores to inject failures.

pub mod sqlite;

use crate::error::Result;
use crate::models::{
  BasketLine, Food, FoodChanges, NewFood, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, Role, User,
  UserContact,
};
use async_trait::async_trait;

#[async_trait]
pub trait FoodStore: Send + Sync {
  async fn insert(&self, food: &NewFood) -> Result<Food>;
  /// Newest first.
  async fn list(&self) -> Result<Vec<Food>>;
  async fn get(&self, id: i64) -> Result<Option<Food>>;
  async fn list_by_category(&self, category: &str) -> Result<Vec<Food>>;
  /// Applies already-normalized changes. `None` when the food does not exist.
  async fn update(&self, id: i64, changes: &FoodChanges) -> Result<Option<Food>>;
  /// `false` when nothing was deleted.
  async fn delete(&self, id: i64) -> Result<bool>;
  async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait BasketStore: Send + Sync {
  /// Inserts a line with quantity 1, or increments the existing one, in a single statement.
  async fn add_or_increment(&self, user_id: i64, food_id: i64) -> Result<BasketLine>;
  /// Newest first.
  async fn list_by_user(&self, user_id: i64) -> Result<Vec<BasketLine>>;
  async fn remove(&self, user_id: i64, food_id: i64) -> Result<bool>;
  /// Overwrites the quantity of an existing line. `quantity` must be positive.
  async fn set_quantity(&self, user_id: i64, food_id: i64, quantity: i64) -> Result<Option<BasketLine>>;
  /// Returns the number of removed lines.
  async fn clear(&self, user_id: i64) -> Result<u64>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Writes the order and all of its items atomically; returns the new order id.
  async fn create_with_items(&self, order: &NewOrder, items: &[NewOrderItem]) -> Result<i64>;
  async fn get(&self, id: i64) -> Result<Option<Order>>;
  async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>>;
  /// Newest first.
  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>>;
  async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>>;
  async fn delete(&self, id: i64) -> Result<bool>;
  async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
  /// Inserts or refreshes profile fields, leaving an existing role untouched.
  async fn upsert_contact(&self, contact: &UserContact) -> Result<User>;
  async fn get(&self, telegram_id: i64) -> Result<Option<User>>;
  /// `None` when no such user is registered.
  async fn set_role(&self, telegram_id: i64, role: Role) -> Result<Option<User>>;
  async fn list(&self) -> Result<Vec<User>>;
  async fn count(&self) -> Result<i64>;
}
