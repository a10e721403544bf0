// src/errors.rs

use crate::web::response::ApiResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use amur_core::Error as DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Domain(#[from] DomainError),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  /// Request could not be decoded (bad JSON body, bad path segment).
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Configuration Error: {0}")]
  Config(String),
}

impl ApiError {
  /// Short, client-safe summary used as the envelope `message`.
  fn summary(&self) -> &'static str {
    match self {
      ApiError::Domain(DomainError::Validation(_)) | ApiError::BadRequest(_) => "Invalid request",
      ApiError::Domain(DomainError::EmptyBasket) => "Basket is empty",
      ApiError::Domain(DomainError::NotFound(_)) => "Resource not found",
      ApiError::Domain(DomainError::FoodNotFound(_)) => "Food not found",
      ApiError::Domain(DomainError::Conflict(_)) => "Conflict",
      ApiError::Auth(_) => "Authentication required",
      ApiError::Forbidden(_) => "Access denied",
      _ => "Internal server error",
    }
  }

  /// Detail string for the envelope `error` field. Server-side faults are
  /// never echoed back.
  fn detail(&self) -> String {
    match self {
      ApiError::Domain(DomainError::Validation(m))
      | ApiError::Domain(DomainError::NotFound(m))
      | ApiError::Domain(DomainError::Conflict(m))
      | ApiError::BadRequest(m)
      | ApiError::Auth(m)
      | ApiError::Forbidden(m) => m.clone(),
      ApiError::Domain(e @ DomainError::FoodNotFound(_)) | ApiError::Domain(e @ DomainError::EmptyBasket) => {
        e.to_string()
      }
      _ => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Domain(DomainError::Validation(_))
      | ApiError::Domain(DomainError::EmptyBasket)
      | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::Domain(DomainError::NotFound(_)) | ApiError::Domain(DomainError::FoodNotFound(_)) => {
        StatusCode::NOT_FOUND
      }
      ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with server error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }
    HttpResponse::build(status).json(ApiResponse::<()>::failure(self.summary(), self.detail()))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = ApiError> = std::result::Result<T, E>;
