// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
  /// Messenger platform id; the user's identity everywhere in the system.
  pub telegram_id: i64,
  pub first_name: String,
  pub username: String,
  pub language_code: String,
  pub phone: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Contact data reported by the bot when a user shares their phone number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserContact {
  pub telegram_id: i64,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub language_code: Option<String>,
  pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
  #[serde(flatten)]
  pub user: User,
  /// Short code shown back to the user after registration.
  pub code: String,
}
