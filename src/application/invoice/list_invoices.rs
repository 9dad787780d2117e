use std::str::FromStr;
use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Clone, Default)]
pub struct ListInvoicesCommand {
  /// Status name such as `DRAFT`; `None` lists everything
  pub status_filter: Option<String>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Newest first
  ///
  /// # Errors
  /// `InvoiceError::Validation` when the status filter names no known status
  pub async fn execute(&self, command: ListInvoicesCommand) -> Result<Vec<Invoice>, InvoiceError> {
    let status_filter = command
      .status_filter
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty());

    match status_filter {
      Some(status) => {
        let status = InvoiceStatus::from_str(&status)?;
        self.invoice_service.get_invoices_by_status(status).await
      }
      None => self.invoice_service.get_all_invoices().await,
    }
  }
}
