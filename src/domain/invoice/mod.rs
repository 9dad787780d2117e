pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Invoice, InvoiceHeader, InvoiceItem, InvoiceShipment};
pub use errors::{InvoiceError, InvoiceErrorKind};
pub use ports::{
  InvoiceItemRepository, InvoiceRepository, InvoiceShipmentRepository, InvoiceUnitOfWork,
};
pub use services::{
  InvoiceData, InvoiceItemData, InvoiceService, InvoiceServiceDependencies, InvoiceUpdateData,
};
pub use value_objects::{Currency, InvoiceStatus, ValueObjectError};
