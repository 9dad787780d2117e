pub mod audit_log_repository;
pub mod invoice_history_repository;
pub mod invoice_item_repository;
pub mod invoice_repository;
pub mod invoice_shipment_repository;
pub mod invoice_unit_of_work;
pub mod shipment_repository;
pub mod user_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use audit_log_repository::PostgresAuditLogRepository;
pub use invoice_history_repository::PostgresInvoiceHistoryRepository;
pub use invoice_item_repository::PostgresInvoiceItemRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use invoice_shipment_repository::PostgresInvoiceShipmentRepository;
pub use invoice_unit_of_work::PostgresInvoiceUnitOfWork;
pub use shipment_repository::PostgresShipmentRepository;
pub use user_repository::PostgresUserRepository;
