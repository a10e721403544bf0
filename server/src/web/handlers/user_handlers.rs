// src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use amur_core::models::{Role, UserContact};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::{AdminAccess, TelegramUser};
use crate::web::response;

#[derive(Deserialize, Debug)]
pub struct SetRolePayload {
  pub role: Role,
}

/// Called by the bot when a user shares their contact.
#[instrument(
  name = "handler::save_contact",
  skip(app_state, req_payload, _admin),
  fields(telegram_id = req_payload.telegram_id)
)]
pub async fn save_contact_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  req_payload: web::Json<UserContact>,
) -> Result<HttpResponse, ApiError> {
  let user = app_state.users.save_contact(req_payload.into_inner()).await?;
  let profile = app_state.users.profile(user.telegram_id).await?;
  Ok(response::ok("Contact saved", profile))
}

#[instrument(name = "handler::current_user", skip(app_state, user), fields(user_id = user.telegram_id))]
pub async fn current_user_handler(app_state: web::Data<AppState>, user: TelegramUser) -> Result<HttpResponse, ApiError> {
  let profile = app_state.users.profile(user.telegram_id).await?;
  Ok(response::ok("User retrieved", profile))
}

#[instrument(name = "handler::list_users", skip(app_state, _admin))]
pub async fn list_users_handler(app_state: web::Data<AppState>, _admin: AdminAccess) -> Result<HttpResponse, ApiError> {
  let users = app_state.users.list().await?;
  Ok(response::ok("Users retrieved", users))
}

#[instrument(name = "handler::user_stats", skip(app_state, _admin))]
pub async fn user_stats_handler(app_state: web::Data<AppState>, _admin: AdminAccess) -> Result<HttpResponse, ApiError> {
  let count = app_state.users.count().await?;
  Ok(response::ok("User statistics", json!({ "total_users": count })))
}

#[instrument(name = "handler::set_user_role", skip(app_state, req_payload), fields(role = ?req_payload.role))]
pub async fn set_user_role_handler(
  app_state: web::Data<AppState>,
  admin: AdminAccess,
  path: web::Path<i64>,
  req_payload: web::Json<SetRolePayload>,
) -> Result<HttpResponse, ApiError> {
  let telegram_id = path.into_inner();
  let user = app_state.users.set_role(telegram_id, req_payload.role).await?;
  info!(granted_by = ?admin, "User role updated via API.");
  Ok(response::ok("User role updated", user))
}
