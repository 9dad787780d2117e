//! Invoice use cases

mod change_invoice_status;
mod create_draft_invoice;
mod get_invoice;
mod issue_invoice;
mod list_invoices;
mod update_draft_invoice;

pub use change_invoice_status::{ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase};
pub use create_draft_invoice::{
  CreateDraftInvoiceCommand, CreateDraftInvoiceUseCase, InvoiceInput, InvoiceItemInput,
};
pub use get_invoice::GetInvoiceUseCase;
pub use issue_invoice::IssueInvoiceUseCase;
pub use list_invoices::{ListInvoicesCommand, ListInvoicesUseCase};
pub use update_draft_invoice::{UpdateDraftInvoiceCommand, UpdateDraftInvoiceUseCase};
