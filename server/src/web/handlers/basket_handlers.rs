// src/web/handlers/basket_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::TelegramUser;
use crate::web::response;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddToBasketPayload {
  pub food_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct SetQuantityPayload {
  pub quantity: i64,
}

#[instrument(
  name = "handler::add_to_basket",
  skip(app_state, req_payload, user),
  fields(user_id = user.telegram_id, food_id = req_payload.food_id)
)]
pub async fn add_to_basket_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToBasketPayload>,
  user: TelegramUser,
) -> Result<HttpResponse, ApiError> {
  let line = app_state
    .baskets
    .add_to_basket(user.telegram_id, req_payload.food_id)
    .await?;
  info!(quantity = line.quantity, "Item added to basket.");
  Ok(response::ok("Item added to basket", line))
}

#[instrument(name = "handler::get_basket", skip(app_state, user), fields(user_id = user.telegram_id))]
pub async fn get_basket_handler(app_state: web::Data<AppState>, user: TelegramUser) -> Result<HttpResponse, ApiError> {
  let basket = app_state.baskets.detailed_basket(user.telegram_id).await?;
  Ok(response::ok("Basket retrieved", basket))
}

#[instrument(
  name = "handler::set_basket_quantity",
  skip(app_state, req_payload, user),
  fields(user_id = user.telegram_id, quantity = req_payload.quantity)
)]
pub async fn set_basket_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<SetQuantityPayload>,
  user: TelegramUser,
) -> Result<HttpResponse, ApiError> {
  let food_id = path.into_inner();
  match app_state
    .baskets
    .set_quantity(user.telegram_id, food_id, req_payload.quantity)
    .await?
  {
    Some(line) => Ok(response::ok("Basket quantity updated", line)),
    None => Ok(response::done("Item removed from basket")),
  }
}

#[instrument(name = "handler::remove_from_basket", skip(app_state, user), fields(user_id = user.telegram_id))]
pub async fn remove_from_basket_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  user: TelegramUser,
) -> Result<HttpResponse, ApiError> {
  app_state.baskets.remove(user.telegram_id, path.into_inner()).await?;
  Ok(response::done("Item removed from basket"))
}

#[instrument(name = "handler::clear_basket", skip(app_state, user), fields(user_id = user.telegram_id))]
pub async fn clear_basket_handler(app_state: web::Data<AppState>, user: TelegramUser) -> Result<HttpResponse, ApiError> {
  let removed = app_state.baskets.clear(user.telegram_id).await?;
  Ok(response::ok("Basket cleared", json!({ "removed_lines": removed })))
}
