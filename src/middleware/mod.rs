//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers and may
//! short-circuit a request (e.g. reject an unauthorized mutation).

/// Admin key guard for mutating endpoints
pub mod auth;
