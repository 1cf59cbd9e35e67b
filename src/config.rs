// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the Webmention receiver service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Webmention receiver service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// MongoDB connection URI, or "memory" for the in-memory store
    /// (default: mongodb://localhost:27017/app_data)
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,

    /// URL prefix identifying local post pages; a Webmention target must
    /// start with this prefix (default: http://localhost:3000/posts/)
    #[serde(default = "default_target_prefix")]
    pub target_prefix: String,

    /// Timeout for the outbound source fetch in seconds (default: 10)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017/app_data".to_string()
}

fn default_target_prefix() -> String {
    "http://localhost:3000/posts/".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            mongodb_uri: default_mongodb_uri(),
            target_prefix: default_target_prefix(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            mongodb_uri: std::env::var("MONGODB_URI").unwrap_or_else(|_| default_mongodb_uri()),
            target_prefix: std::env::var("TARGET_PREFIX")
                .unwrap_or_else(|_| default_target_prefix()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_fetch_timeout_secs),
        }
    }

    /// Get the source fetch timeout
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
