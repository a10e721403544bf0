// src/web/response.rs

//! The `{success, message, data?, error?}` envelope every endpoint answers with.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
  pub fn success(message: impl Into<String>, data: T) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: Some(data),
      error: None,
    }
  }
}

impl ApiResponse<()> {
  pub fn message_only(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: None,
      error: None,
    }
  }

  pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
    Self {
      success: false,
      message: message.into(),
      data: None,
      error: Some(error.into()),
    }
  }
}

pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
  HttpResponse::Ok().json(ApiResponse::success(message, data))
}

pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
  HttpResponse::Created().json(ApiResponse::success(message, data))
}

pub fn done(message: &str) -> HttpResponse {
  HttpResponse::Ok().json(ApiResponse::message_only(message))
}
