use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AuditError;

/// Kind of state change recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
  Create,
  Update,
  Issue,
  Pay,
  Cancel,
  Delete,
}

impl AuditAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      AuditAction::Create => "CREATE",
      AuditAction::Update => "UPDATE",
      AuditAction::Issue => "ISSUE",
      AuditAction::Pay => "PAY",
      AuditAction::Cancel => "CANCEL",
      AuditAction::Delete => "DELETE",
    }
  }
}

impl fmt::Display for AuditAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AuditAction {
  type Err = AuditError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "CREATE" => Ok(AuditAction::Create),
      "UPDATE" => Ok(AuditAction::Update),
      "ISSUE" => Ok(AuditAction::Issue),
      "PAY" => Ok(AuditAction::Pay),
      "CANCEL" => Ok(AuditAction::Cancel),
      "DELETE" => Ok(AuditAction::Delete),
      _ => Err(AuditError::InvalidAction(s.to_string())),
    }
  }
}
