// src/web/handlers/food_handlers.rs

use actix_web::{web, HttpResponse};
use amur_core::models::{FoodChanges, NewFood};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::AdminAccess;
use crate::web::response;

#[instrument(name = "handler::list_foods", skip(app_state))]
pub async fn list_foods_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
  let foods = app_state.foods.list().await?;
  Ok(response::ok("Foods retrieved", foods))
}

#[instrument(name = "handler::get_food", skip(app_state))]
pub async fn get_food_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, ApiError> {
  let food = app_state.foods.get(path.into_inner()).await?;
  Ok(response::ok("Food retrieved", food))
}

#[instrument(name = "handler::foods_by_category", skip(app_state))]
pub async fn list_foods_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  let foods = app_state.foods.list_by_category(&path.into_inner()).await?;
  Ok(response::ok("Foods retrieved", foods))
}

#[instrument(name = "handler::food_stats", skip(app_state))]
pub async fn food_stats_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
  let count = app_state.foods.count().await?;
  Ok(response::ok("Food statistics", json!({ "total_foods": count })))
}

#[instrument(
  name = "handler::create_food",
  skip(app_state, req_payload, _admin),
  fields(name = %req_payload.name, price_cents = req_payload.price_cents)
)]
pub async fn create_food_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  req_payload: web::Json<NewFood>,
) -> Result<HttpResponse, ApiError> {
  let food = app_state.foods.create(req_payload.into_inner()).await?;
  info!(food_id = food.id, "Food created via API.");
  Ok(response::created("Food created", food))
}

#[instrument(name = "handler::update_food", skip(app_state, req_payload, _admin))]
pub async fn update_food_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<i64>,
  req_payload: web::Json<FoodChanges>,
) -> Result<HttpResponse, ApiError> {
  let food = app_state.foods.update(path.into_inner(), req_payload.into_inner()).await?;
  Ok(response::ok("Food updated", food))
}

#[instrument(name = "handler::delete_food", skip(app_state, _admin))]
pub async fn delete_food_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
  app_state.foods.delete(path.into_inner()).await?;
  Ok(response::done("Food deleted"))
}
