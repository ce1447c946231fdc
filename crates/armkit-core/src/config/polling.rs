//! Polling and HTTP settings stored in profiles

use serde::{Deserialize, Serialize};

/// How long-running operations are waited on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between polls when the service suggests no delay
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Overall wait budget; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Use Retry-After style headers in place of the interval
    #[serde(default = "default_true")]
    pub honor_retry_after: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: None,
            honor_retry_after: true,
        }
    }
}

/// Transport settings for the HTTP invoker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    30
}
