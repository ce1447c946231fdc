use super::models::{RoleDefinition, RoleDefinitionFilter};
use crate::client::resource_url;
use armkit_core::http::path_param;
use armkit_core::{CoreError, Invoker, PageSequence, Request, Result, next_link_pages};
use std::sync::Arc;
use url::Url;

/// Role definitions on a Key Vault or Managed HSM data plane
#[derive(Clone)]
pub struct RoleDefinitionsClient {
    vault_url: Url,
    invoker: Arc<dyn Invoker>,
}

impl std::fmt::Debug for RoleDefinitionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleDefinitionsClient")
            .field("vault_url", &self.vault_url.as_str())
            .finish()
    }
}

impl RoleDefinitionsClient {
    pub const API_VERSION: &'static str = "7.2";

    pub fn new(vault_url: &str, invoker: Arc<dyn Invoker>) -> Result<Self> {
        let vault_url = Url::parse(vault_url)
            .map_err(|e| CoreError::invalid_argument("vault_url", e.to_string()))?;
        Ok(Self { vault_url, invoker })
    }

    fn definitions_url(&self, scope: &str, rest: &str) -> Result<Url> {
        let path = format!(
            "{}/providers/Microsoft.Authorization/roleDefinitions{}",
            scope_path(scope)?,
            rest
        );
        resource_url(&self.vault_url, &path, Self::API_VERSION)
    }

    /// Role definitions visible at `scope` (`/` or `/keys`), optionally filtered
    pub fn list(
        &self,
        scope: &str,
        filter: Option<&RoleDefinitionFilter>,
    ) -> Result<PageSequence<RoleDefinition>> {
        let mut url = self.definitions_url(scope, "")?;
        if let Some(expr) = filter.and_then(RoleDefinitionFilter::to_odata) {
            url.query_pairs_mut().append_pair("$filter", &expr);
        }
        Ok(next_link_pages(
            self.invoker.clone(),
            Request::get(url),
            Some(Self::API_VERSION.to_string()),
        ))
    }

    pub async fn get(&self, scope: &str, role_definition_name: &str) -> Result<RoleDefinition> {
        let url = self.definitions_url(
            scope,
            &format!("/{}", path_param("role_definition_name", role_definition_name)?),
        )?;
        self.invoker
            .invoke(&Request::get(url))
            .await?
            .expect_status(&[200])?
            .json()
    }
}

/// Encode each segment of a scope; `/` maps to the empty prefix
fn scope_path(scope: &str) -> Result<String> {
    if scope.trim().is_empty() {
        return Err(CoreError::invalid_argument("scope", "must not be empty"));
    }
    Ok(scope
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("/{}", urlencoding::encode(segment)))
        .collect())
}
