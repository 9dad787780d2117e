use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
  /// Writing an audit record failed; the surrounding operation is rejected
  #[error("Failed to record audit entry: {0}")]
  LogFailed(String),

  #[error("Invalid audit action: {0}")]
  InvalidAction(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
