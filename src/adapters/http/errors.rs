use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::audit::AuditError;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::invoice::{InvoiceError, InvoiceErrorKind};

use super::dtos::ApiResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Malformed input (400)
  Validation(String),

  /// A business rule refused the operation (400)
  Business(String),

  /// Missing entity (404)
  NotFound(String),

  /// Identity already taken or stale version (409)
  Conflict(String),

  /// Bad credentials or token (401)
  Unauthorized(String),

  /// Authenticated but not allowed (403)
  Forbidden(String),

  /// Anything unexpected (500); the detail is logged, never returned
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Business(msg) => write!(f, "Business error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ApiError {
  /// Message placed in the response envelope
  fn public_message(&self) -> String {
    match self {
      ApiError::Validation(msg)
      | ApiError::Business(msg)
      | ApiError::NotFound(msg)
      | ApiError::Conflict(msg)
      | ApiError::Unauthorized(msg)
      | ApiError::Forbidden(msg) => msg.clone(),
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::Business(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ApiResponse::<()>::error(self.public_message()))
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid username or password".into()),
      AuthError::InvalidToken => ApiError::Unauthorized(error.to_string()),
      AuthError::UsernameAlreadyTaken | AuthError::EmailAlreadyInUse => {
        ApiError::Conflict(error.to_string())
      }
      AuthError::UserNotFound => ApiError::NotFound(error.to_string()),
      AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(RepositoryError::NotFound) => {
        ApiError::NotFound(AuthError::UserNotFound.to_string())
      }
      AuthError::Repository(RepositoryError::DuplicateKey { constraint }) => {
        match AuthError::from_duplicate_key(&constraint) {
          AuthError::Repository(err) => ApiError::Internal(err.to_string()),
          mapped => ApiError::Conflict(mapped.to_string()),
        }
      }
      AuthError::Repository(err) => ApiError::Internal(err.to_string()),
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Token(msg) => ApiError::Internal(msg),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match (&error, error.kind()) {
      (InvoiceError::Validation(err), _) => ApiError::Validation(err.to_string()),
      (InvoiceError::VersionConflict { .. }, _) => ApiError::Conflict(error.to_string()),
      (_, InvoiceErrorKind::NotFound) => ApiError::NotFound(error.to_string()),
      (_, InvoiceErrorKind::Business) => ApiError::Business(error.to_string()),
      (_, InvoiceErrorKind::Internal) => ApiError::Internal(error.to_string()),
    }
  }
}

impl From<AuditError> for ApiError {
  fn from(error: AuditError) -> Self {
    match error {
      AuditError::InvalidAction(_) | AuditError::LogFailed(_) => {
        ApiError::Business(error.to_string())
      }
      AuditError::Database(_) => ApiError::Internal(error.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    // Nested item errors are not part of field_errors()
    if messages.is_empty() {
      messages.push(errors.to_string());
    }
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
