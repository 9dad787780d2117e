//! Application layer
//!
//! Use cases that turn raw commands into domain calls and shape what the
//! HTTP adapter returns.

pub mod audit;
pub mod auth;
pub mod invoice;
pub mod user;
