// src/main.rs

mod config;
mod errors;
mod state;
mod web;

use crate::config::{AppConfig, LogFormat};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use amur_core::store::sqlite;
use amur_core::TableRegistry;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(log_format: LogFormat) {
  // RUST_LOG overrides the default level
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match log_format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  init_tracing(app_config.log_format);
  tracing::info!(config = ?app_config, "Starting Amur food-ordering server...");

  let db_pool = sqlite::connect(&app_config.database_url, app_config.db_max_connections)
    .await
    .context("Failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  tokio::fs::create_dir_all(&app_config.uploads_dir)
    .await
    .with_context(|| format!("Failed to create uploads directory {}", app_config.uploads_dir.display()))?;

  // A missing table file only disables dine-in orders.
  let tables = TableRegistry::load(&app_config.tables_file);

  let app_state = AppState::new(db_pool, app_config.clone(), tables);

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
