pub mod auth;
pub mod history;
pub mod invoices;
pub mod users;
