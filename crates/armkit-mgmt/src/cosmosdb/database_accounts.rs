use super::models::{
    DatabaseAccount, DatabaseAccountCreateUpdateParameters,
    DatabaseAccountListConnectionStringsResult, DatabaseAccountListKeysResult,
    DatabaseAccountListReadOnlyKeysResult, DatabaseAccountRegenerateKeyParameters, KeyKind,
};
use super::API_VERSION;
use super::child_resources::account_url;
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{CoreError, Method, NoContent, Operation, PageSequence, Request, Result};
use tracing::debug;
use url::Url;

/// Cosmos DB database account operations
#[derive(Debug, Clone)]
pub struct DatabaseAccountsClient {
    client: ArmClient,
}

impl DatabaseAccountsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn account_url(&self, resource_group_name: &str, account_name: &str, action: &str) -> Result<Url> {
        account_url(&self.client, resource_group_name, account_name, action)
    }

    pub async fn get(&self, resource_group_name: &str, account_name: &str) -> Result<DatabaseAccount> {
        let url = self.account_url(resource_group_name, account_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    /// All accounts in the subscription
    pub fn list(&self) -> Result<PageSequence<DatabaseAccount>> {
        let path = self
            .client
            .subscription_path("/providers/Microsoft.DocumentDB/databaseAccounts");
        let url = self.client.url(&path, API_VERSION)?;
        Ok(self.client.pages(url, API_VERSION))
    }

    pub fn list_by_resource_group(
        &self,
        resource_group_name: &str,
    ) -> Result<PageSequence<DatabaseAccount>> {
        let path = self.client.subscription_path(&format!(
            "/resourceGroups/{}/providers/Microsoft.DocumentDB/databaseAccounts",
            path_param("resource_group_name", resource_group_name)?
        ));
        let url = self.client.url(&path, API_VERSION)?;
        Ok(self.client.pages(url, API_VERSION))
    }

    /// Create an account, or replace one with the same name
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        account_name: &str,
        parameters: &DatabaseAccountCreateUpdateParameters,
    ) -> Result<Operation<DatabaseAccount>> {
        let url = self.account_url(resource_group_name, account_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.account_url(resource_group_name, account_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    /// Read-write and read-only master keys
    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<DatabaseAccountListKeysResult> {
        let url = self.account_url(resource_group_name, account_name, "/listKeys")?;
        self.client
            .send_json(&Request::new(Method::POST, url), &[200])
            .await
    }

    pub async fn list_read_only_keys(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<DatabaseAccountListReadOnlyKeysResult> {
        let url = self.account_url(resource_group_name, account_name, "/readonlykeys")?;
        self.client
            .send_json(&Request::new(Method::POST, url), &[200])
            .await
    }

    pub async fn list_connection_strings(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<DatabaseAccountListConnectionStringsResult> {
        let url = self.account_url(resource_group_name, account_name, "/listConnectionStrings")?;
        self.client
            .send_json(&Request::new(Method::POST, url), &[200])
            .await
    }

    /// Rotate one of the account keys
    pub async fn begin_regenerate_key(
        &self,
        resource_group_name: &str,
        account_name: &str,
        key_kind: KeyKind,
    ) -> Result<Operation<NoContent>> {
        let url = self.account_url(resource_group_name, account_name, "/regenerateKey")?;
        let request = Request::new(Method::POST, url)
            .with_json(&DatabaseAccountRegenerateKeyParameters { key_kind })?;
        self.client.begin(request).await
    }

    /// Whether an account name is already taken, globally
    ///
    /// The service answers `HEAD` with 200 for taken names and 404 for free
    /// ones; any other status is an error.
    pub async fn check_name_exists(&self, account_name: &str) -> Result<bool> {
        let path = format!(
            "/providers/Microsoft.DocumentDB/databaseAccountNames/{}",
            path_param("account_name", account_name)?
        );
        let url = self.client.url(&path, API_VERSION)?;
        let response = self
            .client
            .invoker()
            .invoke(&Request::new(Method::HEAD, url))
            .await?;
        debug!(account_name, status = response.status(), "Checked account name");
        match response.status() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(CoreError::from_response(&response)),
        }
    }
}
