use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid line item description: {0}")]
  InvalidDescription(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
  Draft,
  Issued,
  Paid,
  Cancelled,
}

impl InvoiceStatus {
  pub fn can_transition_to(&self, new_status: InvoiceStatus) -> bool {
    matches!(
      (self, new_status),
      (InvoiceStatus::Draft, InvoiceStatus::Issued)
        | (InvoiceStatus::Draft, InvoiceStatus::Cancelled)
        | (InvoiceStatus::Issued, InvoiceStatus::Paid)
        | (InvoiceStatus::Issued, InvoiceStatus::Cancelled)
    )
  }

  pub fn is_editable(&self) -> bool {
    matches!(self, InvoiceStatus::Draft)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Draft => "DRAFT",
      InvoiceStatus::Issued => "ISSUED",
      InvoiceStatus::Paid => "PAID",
      InvoiceStatus::Cancelled => "CANCELLED",
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "DRAFT" => Ok(InvoiceStatus::Draft),
      "ISSUED" => Ok(InvoiceStatus::Issued),
      "PAID" => Ok(InvoiceStatus::Paid),
      "CANCELLED" => Ok(InvoiceStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(s.to_string())),
    }
  }
}

// Currency - three-letter ISO 4217 code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
  pub const DEFAULT: &'static str = "USD";

  pub fn new(code: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    let code = code.as_ref().trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
      return Err(ValueObjectError::InvalidCurrency(code));
    }
    Ok(Self(code))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for Currency {
  fn default() -> Self {
    Self(Self::DEFAULT.to_string())
  }
}

impl fmt::Display for Currency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for Currency {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Currency> for String {
  fn from(currency: Currency) -> Self {
    currency.0
  }
}

/// Exclusive bound of every stored amount. Amount columns are NUMERIC(19,4).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Rejects amounts that do not fit the amount columns
pub fn storable(amount: Decimal, field: &str) -> Result<Decimal, ValueObjectError> {
  if amount.abs() >= AMOUNT_LIMIT {
    return Err(ValueObjectError::InvalidAmount(format!(
      "{} must be below {}",
      field, AMOUNT_LIMIT
    )));
  }
  Ok(amount)
}

/// Rejects negative or unstorable monetary amounts
pub fn non_negative(amount: Decimal, field: &str) -> Result<Decimal, ValueObjectError> {
  if amount.is_sign_negative() && !amount.is_zero() {
    return Err(ValueObjectError::InvalidAmount(format!(
      "{} cannot be negative",
      field
    )));
  }
  storable(amount, field)
}
