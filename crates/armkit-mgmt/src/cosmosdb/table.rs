//! Table API tables

use super::child_resources::{
    CreateUpdateParameters, GetResults, THROUGHPUT, ThroughputSettingsGetResults, account_url,
};
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{Method, NoContent, Operation, PageSequence, Request, Result};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResource {
    pub id: String,
}

impl TableResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type TableCreateUpdateParameters = CreateUpdateParameters<TableResource>;
pub type TableGetResults = GetResults<TableResource>;

/// Tables of a Table API account
#[derive(Debug, Clone)]
pub struct TableResourcesClient {
    client: ArmClient,
}

impl TableResourcesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn table_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        table_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!("/tables/{}{}", path_param("table_name", table_name)?, rest);
        account_url(&self.client, resource_group_name, account_name, &rest)
    }

    pub fn list_tables(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<PageSequence<TableGetResults>> {
        let url = account_url(&self.client, resource_group_name, account_name, "/tables")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        table_name: &str,
    ) -> Result<TableGetResults> {
        let url = self.table_url(resource_group_name, account_name, table_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        table_name: &str,
        parameters: &TableCreateUpdateParameters,
    ) -> Result<Operation<TableGetResults>> {
        let url = self.table_url(resource_group_name, account_name, table_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        table_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.table_url(resource_group_name, account_name, table_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_table_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        table_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.table_url(resource_group_name, account_name, table_name, THROUGHPUT)?;
        self.client.send_json(&Request::get(url), &[200]).await
    }
}
