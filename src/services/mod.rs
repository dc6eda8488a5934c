//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They validate input and drive the store; they never build responses.

pub mod ledger_service;
pub mod query_service;
pub mod seed;
