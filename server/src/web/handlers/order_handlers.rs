// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use amur_core::models::CreateOrderRequest;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::{AdminAccess, TelegramUser, TELEGRAM_ID_HEADER};
use crate::web::response;

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: String,
}

#[instrument(
  name = "handler::create_order",
  skip(app_state, req_payload, user),
  fields(user_id = user.telegram_id, delivery_type = %req_payload.delivery_type)
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateOrderRequest>,
  user: TelegramUser,
) -> Result<HttpResponse, ApiError> {
  let created = app_state
    .orders
    .create_order(user.telegram_id, req_payload.into_inner())
    .await?;

  let message = if created.basket_cleared {
    "Order created"
  } else {
    warn!(order_id = created.details.order.id, "Order created with a stale basket.");
    "Order created, but the basket could not be cleared"
  };
  info!(order_id = created.details.order.id, "Order created via API.");
  Ok(response::created(message, created))
}

#[instrument(name = "handler::list_user_orders", skip(app_state, user), fields(user_id = user.telegram_id))]
pub async fn list_user_orders_handler(
  app_state: web::Data<AppState>,
  user: TelegramUser,
) -> Result<HttpResponse, ApiError> {
  let orders = app_state.orders.get_user_orders(user.telegram_id).await?;
  let message = if orders.skipped_order_ids.is_empty() {
    "Orders retrieved"
  } else {
    "Orders retrieved; some orders could not be loaded"
  };
  Ok(response::ok(message, orders))
}

/// Admins see any order; a customer only sees their own.
#[instrument(name = "handler::get_order", skip(app_state, admin, user))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  admin: Option<AdminAccess>,
  user: Option<TelegramUser>,
) -> Result<HttpResponse, ApiError> {
  let order_id = path.into_inner();
  let details = match (admin, user) {
    (Some(_), _) => app_state.orders.get_order_details(order_id).await?,
    (None, Some(user)) => {
      app_state
        .orders
        .get_order_details_for_user(order_id, user.telegram_id)
        .await?
    }
    (None, None) => {
      return Err(ApiError::Auth(format!(
        "Missing or invalid {} header",
        TELEGRAM_ID_HEADER
      )))
    }
  };
  Ok(response::ok("Order retrieved", details))
}

#[instrument(
  name = "handler::update_order_status",
  skip(app_state, req_payload, _admin),
  fields(status = %req_payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, ApiError> {
  let order = app_state
    .orders
    .update_order_status(path.into_inner(), &req_payload.status)
    .await?;
  Ok(response::ok("Order status updated", order))
}

#[instrument(name = "handler::delete_order_admin", skip(app_state, _admin))]
pub async fn delete_order_admin_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
  app_state.orders.delete_order_admin(path.into_inner()).await?;
  Ok(response::done("Order deleted"))
}

#[instrument(name = "handler::order_stats", skip(app_state, _admin))]
pub async fn order_stats_handler(app_state: web::Data<AppState>, _admin: AdminAccess) -> Result<HttpResponse, ApiError> {
  let count = app_state.orders.order_count().await?;
  Ok(response::ok("Order statistics", json!({ "total_orders": count })))
}
