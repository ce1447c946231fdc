//! Storage quota usage models

use serde::{Deserialize, Serialize};

/// One quota counter for a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub unit: Option<UsageUnit>,
    /// Amount allocated in the subscription
    #[serde(default)]
    pub current_value: Option<i32>,
    /// Most that can be allocated in the subscription
    #[serde(default)]
    pub limit: Option<i32>,
    pub name: UsageName,
}

impl Usage {
    /// Room left under the limit, when both numbers are known
    pub fn remaining(&self) -> Option<i32> {
        Some(self.limit? - self.current_value?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageName {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub localized_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageUnit {
    Count,
    Bytes,
    Seconds,
    Percent,
    CountsPerSecond,
    BytesPerSecond,
    #[serde(other)]
    Unknown,
}
