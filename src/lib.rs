//! House Points Server
//!
//! A REST API that keeps a point total for competing houses. Administrators
//! add or remove points with an optional comment; every adjustment is stored
//! as an immutable transaction in the same database transaction that moves
//! the balance.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or an in-memory store
//! - **Authentication**: optional admin key with SHA-256 hashing
//! - **Format**: JSON requests/responses (camelCase fields)

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
