// src/store/sqlite/users.rs

use crate::error::Result;
use crate::models::{Role, User, UserContact};
use crate::store::UserStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "telegram_id, first_name, username, language_code, phone, role, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteUserStore {
  pool: SqlitePool,
}

impl SqliteUserStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserStore for SqliteUserStore {
  async fn upsert_contact(&self, contact: &UserContact) -> Result<User> {
    let now = Utc::now();
    // `role` is only written on first insert.
    let sql = format!(
      "INSERT INTO users (telegram_id, first_name, username, language_code, phone, role, created_at, updated_at) \
       VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
       ON CONFLICT (telegram_id) DO UPDATE SET \
         first_name = excluded.first_name, \
         username = excluded.username, \
         language_code = excluded.language_code, \
         phone = excluded.phone, \
         updated_at = excluded.updated_at \
       RETURNING {USER_COLUMNS}"
    );
    let user = sqlx::query_as::<_, User>(&sql)
      .bind(contact.telegram_id)
      .bind(contact.first_name.as_deref().unwrap_or_default())
      .bind(contact.username.as_deref().unwrap_or_default())
      .bind(contact.language_code.as_deref().unwrap_or_default())
      .bind(&contact.phone)
      .bind(Role::User)
      .bind(now)
      .bind(now)
      .fetch_one(&self.pool)
      .await?;
    Ok(user)
  }

  async fn get(&self, telegram_id: i64) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ?");
    Ok(sqlx::query_as::<_, User>(&sql).bind(telegram_id).fetch_optional(&self.pool).await?)
  }

  async fn set_role(&self, telegram_id: i64, role: Role) -> Result<Option<User>> {
    let sql = format!("UPDATE users SET role = ?, updated_at = ? WHERE telegram_id = ? RETURNING {USER_COLUMNS}");
    let user = sqlx::query_as::<_, User>(&sql)
      .bind(role)
      .bind(Utc::now())
      .bind(telegram_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn list(&self) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, telegram_id DESC");
    Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
  }

  async fn count(&self) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&self.pool).await?)
  }
}
