use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shipment that can be billed through an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
  pub id: Uuid,
  pub tracking_number: String,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Shipment {
  pub fn new(tracking_number: String, description: Option<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      tracking_number,
      description,
      created_at: Utc::now(),
    }
  }
}
