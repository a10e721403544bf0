// src/services/user_service.rs

use crate::error::{Error, Result};
use crate::models::{Role, User, UserContact, UserProfile};
use crate::store::UserStore;
use std::sync::Arc;
use tracing::{info, instrument};

const DEFAULT_NAME: &str = "N/A";
const DEFAULT_LANGUAGE: &str = "uz";

#[derive(Clone)]
pub struct UserService {
  store: Arc<dyn UserStore>,
}

impl UserService {
  pub fn new(store: Arc<dyn UserStore>) -> Self {
    Self { store }
  }

  /// Records the contact the bot received. Safe to call repeatedly for the same user.
  #[instrument(name = "user::save_contact", skip(self, contact), fields(telegram_id = contact.telegram_id))]
  pub async fn save_contact(&self, contact: UserContact) -> Result<User> {
    let phone = contact.phone.trim().to_string();
    if phone.is_empty() {
      return Err(Error::validation("Phone number is required"));
    }

    let or_default = |value: Option<String>, default: &str| {
      value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
    };

    let normalized = UserContact {
      telegram_id: contact.telegram_id,
      first_name: Some(or_default(contact.first_name, DEFAULT_NAME)),
      username: Some(or_default(contact.username, DEFAULT_NAME)),
      language_code: Some(or_default(contact.language_code, DEFAULT_LANGUAGE)),
      phone,
    };

    let user = self.store.upsert_contact(&normalized).await?;
    info!("User contact saved.");
    Ok(user)
  }

  pub async fn get(&self, telegram_id: i64) -> Result<User> {
    self
      .store
      .get(telegram_id)
      .await?
      .ok_or_else(|| Error::not_found(format!("user {}", telegram_id)))
  }

  pub async fn profile(&self, telegram_id: i64) -> Result<UserProfile> {
    let user = self.get(telegram_id).await?;
    Ok(UserProfile {
      code: Self::user_code(user.telegram_id),
      user,
    })
  }

  /// Whether the id belongs to a registered user holding the admin role.
  /// Unknown ids are simply not admins.
  pub async fn is_admin(&self, telegram_id: i64) -> Result<bool> {
    let user = self.store.get(telegram_id).await?;
    Ok(user.is_some_and(|u| u.role == Role::Admin))
  }

  #[instrument(name = "user::set_role", skip(self))]
  pub async fn set_role(&self, telegram_id: i64, role: Role) -> Result<User> {
    let user = self
      .store
      .set_role(telegram_id, role)
      .await?
      .ok_or_else(|| Error::not_found(format!("user {}", telegram_id)))?;
    info!(role = ?user.role, "User role changed.");
    Ok(user)
  }

  pub async fn list(&self) -> Result<Vec<User>> {
    self.store.list().await
  }

  pub async fn count(&self) -> Result<i64> {
    self.store.count().await
  }

  /// Last four digits of the id; `"0000"` for ids shorter than that.
  pub fn user_code(telegram_id: i64) -> String {
    let digits = telegram_id.unsigned_abs().to_string();
    if digits.len() < 4 {
      return "0000".to_string();
    }
    digits[digits.len() - 4..].to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::UserService;

  #[test]
  fn user_code_takes_last_four_digits() {
    assert_eq!(UserService::user_code(123456789), "6789");
    assert_eq!(UserService::user_code(1000), "1000");
  }

  #[test]
  fn short_ids_get_zero_code() {
    assert_eq!(UserService::user_code(42), "0000");
  }
}
