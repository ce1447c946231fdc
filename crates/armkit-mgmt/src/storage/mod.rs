//! Storage resource provider (`Microsoft.Storage`)

pub mod models;
mod usages;

pub use models::{Usage, UsageName, UsageUnit};
pub use usages::UsagesClient;
