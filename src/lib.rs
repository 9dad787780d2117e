//! Invoicing service: user authentication plus a draft/issue invoice lifecycle
//! with optimistic locking and an audit trail.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
