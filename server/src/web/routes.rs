// src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::handlers::{basket_handlers, food_handlers, order_handlers, user_handlers};
use crate::web::response;

/// Liveness plus a database round-trip.
async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
    Ok(_) => response::ok("Service is healthy", json!({ "status": "ok" })),
    Err(e) => {
      error!(error = %e, "Health check database ping failed.");
      HttpResponse::ServiceUnavailable().json(response::ApiResponse::<()>::failure(
        "Service unavailable",
        "Database is not reachable",
      ))
    }
  }
}

/// Malformed bodies and path segments answer with the regular error envelope.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

// Literal segments (`/stats`, `/category/..`) are registered before `/{id}`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).app_data(path_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Food catalog
      .service(
        web::scope("/foods")
          .route("", web::get().to(food_handlers::list_foods_handler))
          .route("", web::post().to(food_handlers::create_food_handler))
          .route("/stats", web::get().to(food_handlers::food_stats_handler))
          .route(
            "/category/{category}",
            web::get().to(food_handlers::list_foods_by_category_handler),
          )
          .route("/{id}", web::get().to(food_handlers::get_food_handler))
          .route("/{id}", web::put().to(food_handlers::update_food_handler))
          .route("/{id}", web::delete().to(food_handlers::delete_food_handler)),
      )
      // Basket of the calling user
      .service(
        web::scope("/basket")
          .route("", web::post().to(basket_handlers::add_to_basket_handler))
          .route("", web::get().to(basket_handlers::get_basket_handler))
          .route("", web::delete().to(basket_handlers::clear_basket_handler))
          .route("/{food_id}", web::put().to(basket_handlers::set_basket_quantity_handler))
          .route("/{food_id}", web::delete().to(basket_handlers::remove_from_basket_handler)),
      )
      // Orders
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::create_order_handler))
          .route("", web::get().to(order_handlers::list_user_orders_handler))
          .route("/stats", web::get().to(order_handlers::order_stats_handler))
          .route("/{id}", web::get().to(order_handlers::get_order_handler))
          .route("/{id}/status", web::put().to(order_handlers::update_order_status_handler)),
      )
      .service(
        web::scope("/admin").route(
          "/orders/{id}",
          web::delete().to(order_handlers::delete_order_admin_handler),
        ),
      )
      // Users
      .service(
        web::scope("/users")
          .route("", web::get().to(user_handlers::list_users_handler))
          .route("/contact", web::post().to(user_handlers::save_contact_handler))
          .route("/stats", web::get().to(user_handlers::user_stats_handler))
          .route("/me", web::get().to(user_handlers::current_user_handler))
          .route("/{id}/role", web::put().to(user_handlers::set_user_role_handler)),
      ),
  );
}
