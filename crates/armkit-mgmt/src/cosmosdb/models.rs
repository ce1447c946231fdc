//! Cosmos DB account models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Create or replace body for a database account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountCreateUpdateParameters {
    pub location: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub kind: DatabaseAccountKind,
    pub properties: DatabaseAccountCreateUpdateProperties,
}

impl DatabaseAccountCreateUpdateParameters {
    /// A single-region account in `location`
    pub fn new(location: impl Into<String>, kind: DatabaseAccountKind) -> Self {
        let location = location.into();
        Self {
            properties: DatabaseAccountCreateUpdateProperties {
                locations: vec![Location::new(location.clone(), 0)],
                ..Default::default()
            },
            location,
            tags: HashMap::new(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountCreateUpdateProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_policy: Option<ConsistencyPolicy>,
    pub locations: Vec<Location>,
    pub database_account_offer_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_rules: Vec<IpAddressOrRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_virtual_network_filter_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_automatic_failover: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_multiple_write_locations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_key_based_metadata_write_access: Option<bool>,
}

impl Default for DatabaseAccountCreateUpdateProperties {
    fn default() -> Self {
        Self {
            consistency_policy: None,
            locations: Vec::new(),
            database_account_offer_type: "Standard".to_string(),
            ip_rules: Vec::new(),
            is_virtual_network_filter_enabled: None,
            enable_automatic_failover: None,
            capabilities: Vec::new(),
            enable_multiple_write_locations: None,
            disable_key_based_metadata_write_access: None,
        }
    }
}

/// A database account as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccount {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub kind: Option<DatabaseAccountKind>,
    #[serde(default)]
    pub properties: Option<DatabaseAccountProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub document_endpoint: Option<String>,
    #[serde(default)]
    pub consistency_policy: Option<ConsistencyPolicy>,
    #[serde(default)]
    pub write_locations: Vec<Location>,
    #[serde(default)]
    pub read_locations: Vec<Location>,
    #[serde(default)]
    pub is_virtual_network_filter_enabled: Option<bool>,
    #[serde(default)]
    pub enable_automatic_failover: Option<bool>,
    #[serde(default)]
    pub enable_multiple_write_locations: Option<bool>,
    #[serde(default)]
    pub disable_key_based_metadata_write_access: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseAccountKind {
    #[default]
    GlobalDocumentDB,
    MongoDB,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyPolicy {
    pub default_consistency_level: DefaultConsistencyLevel,
    /// Only meaningful for `BoundedStaleness`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_staleness_prefix: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interval_in_seconds: Option<i32>,
}

impl ConsistencyPolicy {
    pub fn new(level: DefaultConsistencyLevel) -> Self {
        Self {
            default_consistency_level: level,
            max_staleness_prefix: None,
            max_interval_in_seconds: None,
        }
    }

    pub fn bounded_staleness(max_staleness_prefix: i64, max_interval_in_seconds: i32) -> Self {
        Self {
            default_consistency_level: DefaultConsistencyLevel::BoundedStaleness,
            max_staleness_prefix: Some(max_staleness_prefix),
            max_interval_in_seconds: Some(max_interval_in_seconds),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultConsistencyLevel {
    Eventual,
    Session,
    BoundedStaleness,
    Strong,
    ConsistentPrefix,
}

/// A region the account is replicated to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    pub location_name: String,
    #[serde(default, skip_serializing)]
    pub document_endpoint: Option<String>,
    #[serde(default, skip_serializing)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub failover_priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_zone_redundant: Option<bool>,
}

impl Location {
    pub fn new(location_name: impl Into<String>, failover_priority: i32) -> Self {
        Self {
            id: None,
            location_name: location_name.into(),
            document_endpoint: None,
            provisioning_state: None,
            failover_priority,
            is_zone_redundant: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressOrRange {
    pub ip_address_or_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountListReadOnlyKeysResult {
    pub primary_readonly_master_key: String,
    pub secondary_readonly_master_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountListKeysResult {
    pub primary_master_key: String,
    pub secondary_master_key: String,
    pub primary_readonly_master_key: String,
    pub secondary_readonly_master_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountConnectionString {
    pub connection_string: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountListConnectionStringsResult {
    #[serde(default)]
    pub connection_strings: Vec<DatabaseAccountConnectionString>,
}

/// Which account key to regenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyKind {
    Primary,
    Secondary,
    PrimaryReadonly,
    SecondaryReadonly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountRegenerateKeyParameters {
    pub key_kind: KeyKind,
}

/// One resource provider operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOperation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display: Option<OperationDisplay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationDisplay {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_parameters_shape() {
        let mut params =
            DatabaseAccountCreateUpdateParameters::new("West US", DatabaseAccountKind::MongoDB);
        params.tags.insert("key1".to_string(), "value1".to_string());
        params.properties.consistency_policy = Some(ConsistencyPolicy::bounded_staleness(300, 1000));
        params.properties.ip_rules = vec![IpAddressOrRange {
            ip_address_or_range: "23.43.230.120".to_string(),
        }];
        params.properties.enable_multiple_write_locations = Some(true);

        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(
            body,
            json!({
                "location": "West US",
                "tags": {"key1": "value1"},
                "kind": "MongoDB",
                "properties": {
                    "consistencyPolicy": {
                        "defaultConsistencyLevel": "BoundedStaleness",
                        "maxStalenessPrefix": 300,
                        "maxIntervalInSeconds": 1000
                    },
                    "locations": [{"locationName": "West US", "failoverPriority": 0}],
                    "databaseAccountOfferType": "Standard",
                    "ipRules": [{"ipAddressOrRange": "23.43.230.120"}],
                    "enableMultipleWriteLocations": true
                }
            })
        );
    }

    #[test]
    fn test_key_kind_wire_names() {
        let body = serde_json::to_value(DatabaseAccountRegenerateKeyParameters {
            key_kind: KeyKind::PrimaryReadonly,
        })
        .unwrap();
        assert_eq!(body, json!({"keyKind": "primaryReadonly"}));
    }

    #[test]
    fn test_operation_display_is_pascal_case() {
        let op: ProviderOperation = serde_json::from_value(json!({
            "name": "Microsoft.DocumentDB/databaseAccounts/read",
            "display": {"Provider": "Microsoft.DocumentDB", "Operation": "Read database account"}
        }))
        .unwrap();
        let display = op.display.unwrap();
        assert_eq!(display.provider.as_deref(), Some("Microsoft.DocumentDB"));
        assert_eq!(display.operation.as_deref(), Some("Read database account"));
    }
}
