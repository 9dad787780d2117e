use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::value_objects::AuditAction;

/// Structured record of a state-changing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
  pub id: Uuid,
  pub entity_type: String,
  pub entity_id: Uuid,
  pub action: AuditAction,
  pub user_id: Uuid,
  pub old_value: Option<Value>,
  pub new_value: Option<Value>,
  pub summary: String,
  pub created_at: DateTime<Utc>,
}

impl AuditLog {
  pub fn new(
    entity_type: impl Into<String>,
    entity_id: Uuid,
    action: AuditAction,
    user_id: Uuid,
    old_value: Option<Value>,
    new_value: Option<Value>,
    summary: impl Into<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      entity_type: entity_type.into(),
      entity_id,
      action,
      user_id,
      old_value,
      new_value,
      summary: summary.into(),
      created_at: Utc::now(),
    }
  }
}

/// Immutable snapshot of an invoice at a given version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceHistory {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub version: i32,
  pub fiscal_folio: Option<String>,
  pub invoice_number: Option<String>,
  pub invoice_data: Value,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
  pub is_reverted: bool,
}

impl InvoiceHistory {
  pub fn new(
    invoice_id: Uuid,
    version: i32,
    invoice_number: Option<String>,
    fiscal_folio: Option<String>,
    invoice_data: Value,
    created_by: Uuid,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      version,
      fiscal_folio,
      invoice_number,
      invoice_data,
      created_by,
      created_at: Utc::now(),
      is_reverted: false,
    }
  }
}
