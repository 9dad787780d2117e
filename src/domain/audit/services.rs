use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{AuditLog, InvoiceHistory};
use super::errors::AuditError;
use super::ports::{AuditLogRepository, InvoiceHistoryRepository};
use super::value_objects::AuditAction;

/// Records audit events and versioned invoice snapshots
pub struct AuditService {
  audit_log_repo: Arc<dyn AuditLogRepository>,
  history_repo: Arc<dyn InvoiceHistoryRepository>,
}

impl AuditService {
  pub fn new(
    audit_log_repo: Arc<dyn AuditLogRepository>,
    history_repo: Arc<dyn InvoiceHistoryRepository>,
  ) -> Self {
    Self {
      audit_log_repo,
      history_repo,
    }
  }

  /// Appends an audit log entry
  ///
  /// Writes are attempted once. Any persistence failure is reported as
  /// `AuditError::LogFailed`.
  #[allow(clippy::too_many_arguments)]
  pub async fn log_event(
    &self,
    entity_type: &str,
    entity_id: Uuid,
    action: AuditAction,
    user_id: Uuid,
    old_value: Option<Value>,
    new_value: Option<Value>,
    summary: &str,
  ) -> Result<AuditLog, AuditError> {
    let entry = AuditLog::new(
      entity_type,
      entity_id,
      action,
      user_id,
      old_value,
      new_value,
      summary,
    );

    let stored = self.audit_log_repo.create(entry).await.map_err(|e| {
      tracing::error!(%entity_id, %action, "Failed to write audit log: {}", e);
      AuditError::LogFailed(e.to_string())
    })?;

    tracing::debug!(%entity_id, %action, entity_type, "Audit event recorded");

    Ok(stored)
  }

  /// Appends a versioned snapshot of an invoice
  pub async fn save_invoice_history(
    &self,
    invoice_id: Uuid,
    version: i32,
    invoice_number: Option<String>,
    fiscal_folio: Option<String>,
    snapshot: Value,
    user_id: Uuid,
  ) -> Result<InvoiceHistory, AuditError> {
    let history = InvoiceHistory::new(
      invoice_id,
      version,
      invoice_number,
      fiscal_folio,
      snapshot,
      user_id,
    );

    self.history_repo.create(history).await.map_err(|e| {
      tracing::error!(%invoice_id, version, "Failed to write invoice history: {}", e);
      AuditError::LogFailed(e.to_string())
    })
  }

  pub async fn get_invoice_history(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<InvoiceHistory>, AuditError> {
    self.history_repo.find_by_invoice_id(invoice_id).await
  }

  pub async fn get_invoice_history_version(
    &self,
    invoice_id: Uuid,
    version: i32,
  ) -> Result<Option<InvoiceHistory>, AuditError> {
    self
      .history_repo
      .find_by_invoice_id_and_version(invoice_id, version)
      .await
  }

  /// All audit entries of one entity, newest first
  pub async fn get_audit_trail(
    &self,
    entity_type: &str,
    entity_id: Uuid,
  ) -> Result<Vec<AuditLog>, AuditError> {
    self
      .audit_log_repo
      .find_by_entity(entity_type, entity_id)
      .await
  }
}
