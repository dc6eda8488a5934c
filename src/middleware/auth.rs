//! Admin key middleware.
//!
//! When an admin key is configured, every mutating request must carry it:
//! 1. Read-only methods (GET, HEAD, OPTIONS) pass straight through
//! 2. Extract the key from the `Authorization: Bearer <key>` header
//! 3. Hash it and compare with the configured key's hash
//! 4. Reject mismatches with HTTP 401
//!
//! Without a configured key, all requests pass.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{app::AppState, error::AppError, store::PointsStore};

/// SHA-256 digest of the configured admin key, hex encoded.
///
/// Only the digest is kept in memory after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminKey {
    key_hash: String,
}

impl AdminKey {
    pub fn new(key: &str) -> Self {
        Self {
            key_hash: hash_key(key),
        }
    }

    /// Whether `presented` is the configured key.
    pub fn matches(&self, presented: &str) -> bool {
        hash_key(presented) == self.key_hash
    }
}

fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Admin key middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer abc123xyz
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if the request is read-only, no key is configured, or the
///   key matches (calls next handler)
/// - `Err(AppError::Unauthorized)` otherwise (returns 401)
pub async fn require_admin_key<S: PointsStore>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(admin_key) = state.admin_key.as_ref() else {
        return Ok(next.run(request).await);
    };

    if [Method::GET, Method::HEAD, Method::OPTIONS].contains(request.method()) {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if !admin_key.matches(presented) {
        tracing::warn!(method = %request.method(), path = %request.uri().path(), "Rejected admin key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_configured_key() {
        let key = AdminKey::new("s3cret");

        assert!(key.matches("s3cret"));
        assert!(!key.matches("s3cret "));
        assert!(!key.matches(""));
    }

    #[test]
    fn stores_hex_digest_not_the_key() {
        let key = AdminKey::new("s3cret");

        assert_eq!(key.key_hash.len(), 64);
        assert!(!key.key_hash.contains("s3cret"));
    }
}
