// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use amur_core::error::{Error, Result};
use amur_core::models::{
  BasketLine, Food, NewFood, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus,
};
use amur_core::store::sqlite::{
  connect, connect_in_memory, SqliteBasketStore, SqliteFoodStore, SqliteOrderStore, SqliteUserStore,
};
use amur_core::store::{BasketStore, OrderStore};
use amur_core::{BasketService, FoodService, OrderService, TableRegistry, UserService};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

pub const TABLE_TOKEN: &str = "qr-hall-05";
pub const TABLE_NAME: &str = "Hall 5";

// --- Store bundle over one in-memory database ---
#[derive(Clone)]
pub struct Stores {
  pub pool: SqlitePool,
  pub foods: Arc<SqliteFoodStore>,
  pub baskets: Arc<SqliteBasketStore>,
  pub orders: Arc<SqliteOrderStore>,
  pub users: Arc<SqliteUserStore>,
}

pub async fn stores() -> Stores {
  let pool = connect_in_memory().await.expect("in-memory database");
  stores_on(pool)
}

/// Stores over a database file in `dir`, with a pool of several connections.
pub async fn file_stores(dir: &Path, max_connections: u32) -> Stores {
  let url = format!("sqlite://{}", dir.join("amur-test.db").display());
  let pool = connect(&url, max_connections).await.expect("file database");
  stores_on(pool)
}

fn stores_on(pool: SqlitePool) -> Stores {
  Stores {
    foods: Arc::new(SqliteFoodStore::new(pool.clone())),
    baskets: Arc::new(SqliteBasketStore::new(pool.clone())),
    orders: Arc::new(SqliteOrderStore::new(pool.clone())),
    users: Arc::new(SqliteUserStore::new(pool.clone())),
    pool,
  }
}

pub fn tables() -> Arc<TableRegistry> {
  Arc::new(TableRegistry::from_pairs([(TABLE_NAME, TABLE_TOKEN), ("Terrace 1", "qr-terrace-01")]))
}

// --- Services wired to the SQLite stores ---
pub struct TestServices {
  pub stores: Stores,
  pub foods: FoodService,
  pub baskets: BasketService,
  pub orders: OrderService,
  pub users: UserService,
}

pub async fn services() -> TestServices {
  services_in(Path::new("./uploads")).await
}

pub async fn services_in(uploads_dir: &Path) -> TestServices {
  let stores = stores().await;
  let foods = FoodService::new(stores.foods.clone(), uploads_dir);
  let baskets = BasketService::new(stores.baskets.clone(), stores.foods.clone());
  let orders = OrderService::new(stores.foods.clone(), stores.baskets.clone(), stores.orders.clone(), tables());
  let users = UserService::new(stores.users.clone());
  TestServices {
    stores,
    foods,
    baskets,
    orders,
    users,
  }
}

/// Order service with replaced basket/order stores, for degraded-path tests.
pub fn order_service_with(
  stores: &Stores,
  baskets: Arc<dyn BasketStore>,
  orders: Arc<dyn OrderStore>,
) -> OrderService {
  OrderService::new(stores.foods.clone(), baskets, orders, tables())
}

// --- Seed helpers ---
pub async fn seed_food(foods: &FoodService, name: &str, price_cents: i64) -> Food {
  foods
    .create(NewFood {
      name: name.to_string(),
      category: "Main".to_string(),
      price_cents,
      image: None,
    })
    .await
    .expect("seed food")
}

/// Inserts a food with a fixed id, bypassing the service.
pub async fn seed_food_with_id(pool: &SqlitePool, id: i64, name: &str, price_cents: i64) {
  let now = Utc::now();
  sqlx::query(
    "INSERT INTO foods (id, name, category, price_cents, image, created_at, updated_at) VALUES (?, ?, 'Main', ?, NULL, ?, ?)",
  )
  .bind(id)
  .bind(name)
  .bind(price_cents)
  .bind(now)
  .bind(now)
  .execute(pool)
  .await
  .expect("seed food with id");
}

pub async fn order_row_count(pool: &SqlitePool) -> i64 {
  sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
    .fetch_one(pool)
    .await
    .expect("count orders")
}

pub async fn order_item_row_count(pool: &SqlitePool) -> i64 {
  sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items")
    .fetch_one(pool)
    .await
    .expect("count order items")
}

// --- Failure-injecting store wrappers ---

/// Basket store whose `clear` always fails.
pub struct ClearFailsBasketStore(pub Arc<SqliteBasketStore>);

#[async_trait]
impl BasketStore for ClearFailsBasketStore {
  async fn add_or_increment(&self, user_id: i64, food_id: i64) -> Result<BasketLine> {
    self.0.add_or_increment(user_id, food_id).await
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<BasketLine>> {
    self.0.list_by_user(user_id).await
  }

  async fn remove(&self, user_id: i64, food_id: i64) -> Result<bool> {
    self.0.remove(user_id, food_id).await
  }

  async fn set_quantity(&self, user_id: i64, food_id: i64, quantity: i64) -> Result<Option<BasketLine>> {
    self.0.set_quantity(user_id, food_id, quantity).await
  }

  async fn clear(&self, _user_id: i64) -> Result<u64> {
    Err(Error::Internal("basket store unavailable".to_string()))
  }
}

/// Order store that cannot read the items of one particular order.
pub struct ItemsFailOrderStore {
  pub inner: Arc<SqliteOrderStore>,
  pub failing_order_id: i64,
}

#[async_trait]
impl OrderStore for ItemsFailOrderStore {
  async fn create_with_items(&self, order: &NewOrder, items: &[NewOrderItem]) -> Result<i64> {
    self.inner.create_with_items(order, items).await
  }

  async fn get(&self, id: i64) -> Result<Option<Order>> {
    self.inner.get(id).await
  }

  async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>> {
    if order_id == self.failing_order_id {
      return Err(Error::Internal(format!("items of order {} unreadable", order_id)));
    }
    self.inner.items_for(order_id).await
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
    self.inner.list_by_user(user_id).await
  }

  async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>> {
    self.inner.update_status(id, status).await
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    self.inner.delete(id).await
  }

  async fn count(&self) -> Result<i64> {
    self.inner.count().await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
