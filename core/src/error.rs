// src/error.rs

use crate::pipeline::PipelineError;
use thiserror::Error;

/// Every failure a domain operation can report.
#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing required input.
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Not found: {0}")]
  NotFound(String),

  /// A basket line references a food that is no longer in the catalog.
  #[error("Food with id {0} not found")]
  FoodNotFound(i64),

  #[error("Basket is empty")]
  EmptyBasket,

  /// A uniqueness constraint was violated.
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Database error: {0}")]
  Sqlx(#[source] sqlx::Error),

  #[error("Workflow error: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl From<sqlx::Error> for Error {
  fn from(err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      if db_err.is_unique_violation() {
        return Error::Conflict(db_err.message().to_string());
      }
    }
    Error::Sqlx(err)
  }
}

impl Error {
  pub fn not_found(what: impl std::fmt::Display) -> Self {
    Error::NotFound(what.to_string())
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Error::Validation(msg.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
