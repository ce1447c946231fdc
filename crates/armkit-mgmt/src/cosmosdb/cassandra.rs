//! Cassandra API keyspaces and tables

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
pub struct CassandraKeyspaceResource {
    pub id: String,
}

impl CassandraKeyspaceResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CassandraTableResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CassandraSchema>,
}

impl CassandraTableResource {
    pub fn new(id: impl Into<String>, schema: CassandraSchema) -> Self {
        Self {
            id: id.into(),
            default_ttl: None,
            schema: Some(schema),
        }
    }
}

/// Column layout of a Cassandra table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CassandraSchema {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub partition_keys: Vec<CassandraPartitionKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_keys: Vec<ClusterKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// CQL type name such as `int` or `ascii`
    #[serde(rename = "type")]
    pub column_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CassandraPartitionKey {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterKey {
    pub name: String,
    /// `Asc` or `Desc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

pub type CassandraKeyspaceCreateUpdateParameters = CreateUpdateParameters<CassandraKeyspaceResource>;
pub type CassandraKeyspaceGetResults = GetResults<CassandraKeyspaceResource>;
pub type CassandraTableCreateUpdateParameters = CreateUpdateParameters<CassandraTableResource>;
pub type CassandraTableGetResults = GetResults<CassandraTableResource>;

/// Keyspaces and tables of a Cassandra API account
#[derive(Debug, Clone)]
pub struct CassandraResourcesClient {
    client: ArmClient,
}

impl CassandraResourcesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn keyspace_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!(
            "/cassandraKeyspaces/{}{}",
            path_param("keyspace_name", keyspace_name)?,
            rest
        );
        account_url(&self.client, resource_group_name, account_name, &rest)
    }

    fn table_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        table_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!("/tables/{}{}", path_param("table_name", table_name)?, rest);
        self.keyspace_url(resource_group_name, account_name, keyspace_name, &rest)
    }

    pub fn list_keyspaces(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<PageSequence<CassandraKeyspaceGetResults>> {
        let url = account_url(&self.client, resource_group_name, account_name, "/cassandraKeyspaces")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_keyspace(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
    ) -> Result<CassandraKeyspaceGetResults> {
        let url = self.keyspace_url(resource_group_name, account_name, keyspace_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_keyspace(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        parameters: &CassandraKeyspaceCreateUpdateParameters,
    ) -> Result<Operation<CassandraKeyspaceGetResults>> {
        let url = self.keyspace_url(resource_group_name, account_name, keyspace_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_keyspace(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.keyspace_url(resource_group_name, account_name, keyspace_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_keyspace_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.keyspace_url(resource_group_name, account_name, keyspace_name, THROUGHPUT)?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub fn list_tables(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
    ) -> Result<PageSequence<CassandraTableGetResults>> {
        let url = self.keyspace_url(resource_group_name, account_name, keyspace_name, "/tables")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        table_name: &str,
    ) -> Result<CassandraTableGetResults> {
        let url = self.table_url(resource_group_name, account_name, keyspace_name, table_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        table_name: &str,
        parameters: &CassandraTableCreateUpdateParameters,
    ) -> Result<Operation<CassandraTableGetResults>> {
        let url = self.table_url(resource_group_name, account_name, keyspace_name, table_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_table(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        table_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.table_url(resource_group_name, account_name, keyspace_name, table_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_table_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        keyspace_name: &str,
        table_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.table_url(
            resource_group_name,
            account_name,
            keyspace_name,
            table_name,
            THROUGHPUT,
        )?;
        self.client.send_json(&Request::get(url), &[200]).await
    }
}
