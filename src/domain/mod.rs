pub mod audit;
pub mod auth;
pub mod invoice;
pub mod shipment;
