//! Shared types for the Cuisineberg client platform
//!
//! Common types used across the client crates: domain models, the order
//! feed message protocol, API response envelopes, and utility types.

pub mod client;
pub mod message;
pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Feed protocol re-exports (for convenient access)
pub use message::{EventType, FeedMessage};

// Response envelope re-export
pub use response::ApiResponse;
