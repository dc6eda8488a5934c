//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query string)
//! 2. Delegates to a service with the store from router state
//! 3. Returns HTTP response (JSON, status code)

/// Health check endpoint
pub mod health;
/// House listing and creation endpoints
pub mod houses;
/// Ledger and history endpoints
pub mod points;
