//! Invoice history and audit trail queries

mod get_audit_trail;
mod get_invoice_history;
mod get_invoice_history_version;

pub use get_audit_trail::GetInvoiceAuditTrailUseCase;
pub use get_invoice_history::GetInvoiceHistoryUseCase;
pub use get_invoice_history_version::GetInvoiceHistoryVersionUseCase;
