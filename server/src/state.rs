// src/state.rs

use crate::config::AppConfig;
use amur_core::store::sqlite::{SqliteBasketStore, SqliteFoodStore, SqliteOrderStore, SqliteUserStore};
use amur_core::{BasketService, FoodService, OrderService, TableRegistry, UserService};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub config: Arc<AppConfig>, // Share loaded config
  pub foods: FoodService,
  pub baskets: BasketService,
  pub orders: OrderService,
  pub users: UserService,
}

impl AppState {
  /// Wires the SQLite stores into the domain services.
  pub fn new(db_pool: SqlitePool, config: Arc<AppConfig>, tables: TableRegistry) -> Self {
    let foods = Arc::new(SqliteFoodStore::new(db_pool.clone()));
    let baskets = Arc::new(SqliteBasketStore::new(db_pool.clone()));
    let orders = Arc::new(SqliteOrderStore::new(db_pool.clone()));
    let users = Arc::new(SqliteUserStore::new(db_pool.clone()));

    Self {
      foods: FoodService::new(foods.clone(), config.uploads_dir.clone()),
      baskets: BasketService::new(baskets.clone(), foods.clone()),
      orders: OrderService::new(foods, baskets, orders, Arc::new(tables)),
      users: UserService::new(users),
      db_pool,
      config,
    }
  }
}
