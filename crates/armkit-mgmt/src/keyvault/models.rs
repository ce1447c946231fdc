//! Key Vault RBAC models

use serde::{Deserialize, Serialize};

/// Narrows a role definition listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDefinitionFilter {
    /// Only the role definition with exactly this name
    pub role_name: Option<String>,
}

impl RoleDefinitionFilter {
    pub fn role_name(name: impl Into<String>) -> Self {
        Self {
            role_name: Some(name.into()),
        }
    }

    /// OData `$filter` expression, if the filter constrains anything
    pub fn to_odata(&self) -> Option<String> {
        self.role_name
            .as_deref()
            .map(|name| format!("roleName eq '{}'", name.replace('\'', "''")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub properties: Option<RoleDefinitionProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinitionProperties {
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub role_type: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub assignable_scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub not_actions: Vec<String>,
    #[serde(default)]
    pub data_actions: Vec<String>,
    #[serde(default)]
    pub not_data_actions: Vec<String>,
}
