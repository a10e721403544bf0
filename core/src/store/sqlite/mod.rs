// src/store/sqlite/mod.rs

//! SQLite implementations of the store traits.

mod basket;
mod foods;
mod orders;
mod users;

pub use basket::SqliteBasketStore;
pub use foods::SqliteFoodStore;
pub use orders::SqliteOrderStore;
pub use users::SqliteUserStore;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SCHEMA: &[&str] = &[
  r#"CREATE TABLE IF NOT EXISTS foods (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    category    TEXT    NOT NULL,
    price_cents INTEGER NOT NULL CHECK (price_cents > 0),
    image       TEXT,
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
  )"#,
  "CREATE INDEX IF NOT EXISTS idx_foods_category ON foods (category)",
  r#"CREATE TABLE IF NOT EXISTS basket_lines (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL,
    food_id    INTEGER NOT NULL REFERENCES foods (id) ON DELETE CASCADE,
    quantity   INTEGER NOT NULL CHECK (typeof(quantity) = 'integer' AND quantity BETWEEN 1 AND 999),
    created_at TEXT    NOT NULL,
    updated_at TEXT    NOT NULL,
    UNIQUE (user_id, food_id)
  )"#,
  r#"CREATE TABLE IF NOT EXISTS orders (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id           INTEGER NOT NULL,
    status            TEXT    NOT NULL,
    delivery_type     TEXT    NOT NULL,
    total_price_cents INTEGER NOT NULL,
    latitude          REAL,
    longitude         REAL,
    table_name        TEXT,
    comment           TEXT,
    order_time        TEXT    NOT NULL,
    created_at        TEXT    NOT NULL,
    updated_at        TEXT    NOT NULL
  )"#,
  "CREATE INDEX IF NOT EXISTS idx_orders_user ON orders (user_id)",
  r#"CREATE TABLE IF NOT EXISTS order_items (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id         INTEGER NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
    food_id          INTEGER NOT NULL,
    quantity         INTEGER NOT NULL CHECK (quantity > 0),
    item_price_cents INTEGER NOT NULL,
    created_at       TEXT    NOT NULL
  )"#,
  "CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items (order_id)",
  r#"CREATE TABLE IF NOT EXISTS users (
    telegram_id   INTEGER PRIMARY KEY,
    first_name    TEXT NOT NULL,
    username      TEXT NOT NULL,
    language_code TEXT NOT NULL,
    phone         TEXT NOT NULL,
    role          TEXT NOT NULL DEFAULT 'user',
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
  )"#,
];

/// Opens a pool with foreign keys enforced and makes sure the schema exists.
#[instrument(name = "store::connect", skip(database_url))]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true)
    .journal_mode(SqliteJournalMode::Wal)
    // Writers on other pool connections wait instead of failing with SQLITE_BUSY.
    .busy_timeout(Duration::from_secs(5));

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect_with(options)
    .await?;

  ensure_schema(&pool).await?;
  Ok(pool)
}

/// Single-connection in-memory database. The connection is never recycled,
/// since closing it would discard the data.
pub async fn connect_in_memory() -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await?;

  ensure_schema(&pool).await?;
  Ok(pool)
}

/// Idempotent DDL bootstrap.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
  for statement in SCHEMA {
    sqlx::query(statement).execute(pool).await?;
  }
  info!(tables = 5, "Database schema ensured.");
  Ok(())
}
