//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response bodies built from them.

/// House model
pub mod house;
/// Point transaction (ledger entry) model
pub mod point_transaction;
