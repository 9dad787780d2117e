pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{AuditLog, InvoiceHistory};
pub use errors::AuditError;
pub use ports::{AuditLogRepository, InvoiceHistoryRepository};
pub use services::AuditService;
pub use value_objects::AuditAction;
