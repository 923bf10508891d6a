//! Client-related types shared with the backend
//!
//! Request/response DTOs used in API communication between the
//! Cuisineberg backend and the client crates.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: String,
    /// Restaurant this account manages (retail accounts only)
    pub restaurant_id: Option<String>,
}

// =============================================================================
// Health API DTOs
// =============================================================================

/// Readiness report returned by the health probe
///
/// `feed_ready` gates the order feed: clients must not open a feed
/// connection while the backend reports it unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub ok: bool,
    #[serde(default)]
    pub feed_ready: bool,
    pub checked_at: Timestamp,
    pub version: Option<String>,
}

// =============================================================================
// Upload API DTOs
// =============================================================================

/// Image upload result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    /// Resolvable URL of the stored image
    pub url: String,
}
