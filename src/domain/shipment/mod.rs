pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::Shipment;
pub use errors::ShipmentError;
pub use ports::ShipmentRepository;
