// src/web/extractors.rs

//! Request identity. The customer is identified by the messenger id the bot
//! front-end forwards in `X-Telegram-ID`. Administrative calls carry either
//! `Authorization: Bearer <ADMIN_TOKEN>` (the bot and other services) or the
//! `X-Telegram-ID` of a user whose stored role is `admin`.

use crate::errors::ApiError;
use crate::state::AppState;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

pub const TELEGRAM_ID_HEADER: &str = "X-Telegram-ID";

#[derive(Debug, Clone, Copy)]
pub struct TelegramUser {
  pub telegram_id: i64,
}

impl FromRequest for TelegramUser {
  type Error = ApiError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    match telegram_id_header(req) {
      Some(telegram_id) => ready(Ok(TelegramUser { telegram_id })),
      None => {
        warn!("TelegramUser extractor: missing or invalid {} header.", TELEGRAM_ID_HEADER);
        ready(Err(ApiError::Auth(format!(
          "Missing or invalid {} header",
          TELEGRAM_ID_HEADER
        ))))
      }
    }
  }
}

fn telegram_id_header(req: &HttpRequest) -> Option<i64> {
  req
    .headers()
    .get(TELEGRAM_ID_HEADER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.trim().parse::<i64>().ok())
    .filter(|id| *id > 0)
}

/// Proof that the caller may perform administrative actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
  /// The request carried the configured admin token.
  ServiceToken,
  /// The request came from a registered user with the admin role.
  Staff { telegram_id: i64 },
}

impl FromRequest for AdminAccess {
  type Error = ApiError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
      return Box::pin(ready(Err(ApiError::Config("Application state is not configured".to_string()))));
    };

    let presented = req
      .headers()
      .get(AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| value.strip_prefix("Bearer "))
      .map(str::trim);

    // A presented token decides on its own; it never falls back to the role check.
    match presented {
      Some(token) if tokens_match(token, &state.config.admin_token) => {
        return Box::pin(ready(Ok(AdminAccess::ServiceToken)));
      }
      Some(_) => {
        warn!(path = %req.path(), "AdminAccess extractor: rejected admin token.");
        return Box::pin(ready(Err(ApiError::Forbidden("Invalid admin token".to_string()))));
      }
      None => {}
    }

    let Some(telegram_id) = telegram_id_header(req) else {
      return Box::pin(ready(Err(ApiError::Auth("Admin credentials required".to_string()))));
    };

    let path = req.path().to_string();
    Box::pin(async move {
      if state.users.is_admin(telegram_id).await? {
        Ok(AdminAccess::Staff { telegram_id })
      } else {
        warn!(%path, telegram_id, "AdminAccess extractor: caller lacks the admin role.");
        Err(ApiError::Forbidden("Admin role required".to_string()))
      }
    })
  }
}

/// Comparison whose running time does not depend on where the inputs differ.
fn tokens_match(presented: &str, expected: &str) -> bool {
  let (a, b) = (presented.as_bytes(), expected.as_bytes());
  if a.len() != b.len() {
    return false;
  }
  a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
  use super::tokens_match;

  #[test]
  fn token_comparison() {
    assert!(tokens_match("abc", "abc"));
    assert!(!tokens_match("abd", "abc"));
    assert!(!tokens_match("abcd", "abc"));
  }
}
