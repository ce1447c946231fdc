//! Envelopes shared by the databases, containers and tables nested under an account
//!
//! Every API flavor (Cassandra, MongoDB, Gremlin, Table) wraps its own
//! resource body in the same create and read envelopes, and exposes
//! provisioned throughput through the same `throughputSettings/default`
//! child.

use crate::client::ArmClient;
use armkit_core::Result;
use armkit_core::http::path_param;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// `.../databaseAccounts/{account}` followed by `rest`, which must already be encoded
pub(crate) fn account_url(
    client: &ArmClient,
    resource_group_name: &str,
    account_name: &str,
    rest: &str,
) -> Result<Url> {
    let path = client.subscription_path(&format!(
        "/resourceGroups/{}/providers/Microsoft.DocumentDB/databaseAccounts/{}{}",
        path_param("resource_group_name", resource_group_name)?,
        path_param("account_name", account_name)?,
        rest
    ));
    client.url(&path, super::API_VERSION)
}

/// Suffix addressing the throughput of a database, keyspace, container or table
pub(crate) const THROUGHPUT: &str = "/throughputSettings/default";

/// Request options applied when a resource is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateOptions {
    /// Provisioned request units per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u32>,
}

/// Create or replace body for a resource nested under an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateParameters<R> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: CreateUpdateProperties<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateProperties<R> {
    pub resource: R,
    #[serde(default)]
    pub options: CreateUpdateOptions,
}

impl<R> CreateUpdateParameters<R> {
    /// Shared throughput, no tags
    pub fn new(resource: R) -> Self {
        Self {
            location: None,
            tags: HashMap::new(),
            properties: CreateUpdateProperties {
                resource,
                options: CreateUpdateOptions::default(),
            },
        }
    }

    /// Provision `throughput` RU/s for this resource alone
    pub fn with_throughput(mut self, throughput: u32) -> Self {
        self.properties.options.throughput = Some(throughput);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A nested resource as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResults<R> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: GetProperties<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProperties<R> {
    pub resource: Stored<R>,
}

impl<R> GetResults<R> {
    /// The resource body, without system properties
    pub fn resource(&self) -> &R {
        &self.properties.resource.resource
    }
}

/// A resource body plus the system properties the service stamps on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<R> {
    #[serde(flatten)]
    pub resource: R,
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(rename = "_ts", default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Provisioned throughput of a nested resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputSettingsGetResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub properties: GetProperties<ThroughputSettingsResource>,
}

impl ThroughputSettingsGetResults {
    /// Manual RU/s, `None` for autoscale
    pub fn throughput(&self) -> Option<u32> {
        self.properties.resource.resource.throughput
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputSettingsResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_settings: Option<AutoscaleSettingsResource>,
    /// Reported by the service as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_throughput: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_replace_pending: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleSettingsResource {
    pub max_throughput: u32,
}
