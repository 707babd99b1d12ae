//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files;
//! embedders usually construct them directly instead.

use serde::{Deserialize, Serialize};

/// Host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    /// Bind address (e.g., "127.0.0.1:8080"; port 0 picks an ephemeral
    /// port on first start).
    pub bind_address: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}
