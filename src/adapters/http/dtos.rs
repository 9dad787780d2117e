use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::auth::{AuthenticatedUserResponse, UserProfileResponse};
use crate::application::invoice::{InvoiceInput, InvoiceItemInput};

/// Envelope wrapping every response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  pub message: String,
  pub data: Option<T>,
}

impl<T> ApiResponse<T> {
  pub fn success(message: impl Into<String>, data: T) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: Some(data),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      success: false,
      message: message.into(),
      data: None,
    }
  }
}

impl ApiResponse<()> {
  /// Success without a payload; `data` serializes as null
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: None,
    }
  }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(
    min = 3,
    max = 50,
    message = "Username must be between 3 and 50 characters"
  ))]
  pub username: String,

  #[validate(email(message = "Email should be valid"))]
  pub email: String,

  #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
  #[serde(default)]
  pub full_name: String,

  #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Username or email is required"))]
  pub username_or_email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenQuery {
  pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  #[serde(rename = "type")]
  pub token_type: String,
  pub user_id: Uuid,
  pub username: String,
  pub email: String,
  pub expires_at: DateTime<Utc>,
}

impl From<AuthenticatedUserResponse> for AuthResponse {
  fn from(response: AuthenticatedUserResponse) -> Self {
    Self {
      token: response.token,
      token_type: "Bearer".to_string(),
      user_id: response.user_id,
      username: response.username,
      email: response.email,
      expires_at: response.expires_at,
    }
  }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  pub full_name: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<UserProfileResponse> for UserResponse {
  fn from(profile: UserProfileResponse) -> Self {
    Self {
      id: profile.user_id,
      username: profile.username,
      email: profile.email,
      full_name: profile.full_name,
      is_active: profile.is_active,
      created_at: profile.created_at,
      updated_at: profile.updated_at,
    }
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
  #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
  pub full_name: String,

  #[validate(email(message = "Email should be valid"))]
  pub email: String,
}

// ============================================================================
// Invoices
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceItemRequest {
  #[validate(length(min = 1, message = "Item description is required"))]
  pub description: String,

  #[validate(range(min = 1, message = "Quantity must be positive"))]
  pub quantity: Option<i32>,

  pub unit_price: Option<Decimal>,

  pub total_price: Option<Decimal>,

  pub shipment_id: Option<Uuid>,
}

impl From<InvoiceItemRequest> for InvoiceItemInput {
  fn from(item: InvoiceItemRequest) -> Self {
    Self {
      description: item.description,
      quantity: item.quantity,
      unit_price: item.unit_price,
      total_price: item.total_price,
      shipment_id: item.shipment_id,
    }
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  pub fiscal_folio: Option<String>,

  pub invoice_number: Option<String>,

  #[validate(length(max = 255, message = "Client name must not exceed 255 characters"))]
  #[serde(default)]
  pub client_name: String,

  pub invoice_date: Option<NaiveDate>,

  pub due_date: Option<NaiveDate>,

  pub tax_amount: Option<Decimal>,

  #[validate(length(equal = 3, message = "Currency must be a 3 letter code"))]
  pub currency: Option<String>,

  #[validate(nested)]
  #[serde(default)]
  pub items: Vec<InvoiceItemRequest>,

  #[serde(default)]
  pub shipment_ids: Vec<Uuid>,
}

impl From<InvoiceRequest> for InvoiceInput {
  fn from(request: InvoiceRequest) -> Self {
    Self {
      fiscal_folio: request.fiscal_folio,
      invoice_number: request.invoice_number,
      client_name: request.client_name,
      invoice_date: request.invoice_date,
      due_date: request.due_date,
      tax_amount: request.tax_amount,
      currency: request.currency,
      items: request.items.into_iter().map(InvoiceItemInput::from).collect(),
      shipment_ids: request.shipment_ids,
    }
  }
}

/// Update body: the editable fields plus the version the client last saw
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
  #[validate(range(min = 1, message = "Version must be positive"))]
  pub version: i32,

  #[serde(flatten)]
  #[validate(nested)]
  pub invoice: InvoiceRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInvoicesQuery {
  pub status: Option<String>,
}
