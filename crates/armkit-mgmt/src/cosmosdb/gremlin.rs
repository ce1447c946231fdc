//! Gremlin (graph) API databases and graphs

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
pub struct GremlinDatabaseResource {
    pub id: String,
}

impl GremlinDatabaseResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GremlinGraphResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<ContainerPartitionKey>,
    /// Seconds; `-1` keeps items forever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
}

impl GremlinGraphResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPartitionKey {
    pub paths: Vec<String>,
    #[serde(default)]
    pub kind: PartitionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl ContainerPartitionKey {
    /// Hash partitioning on one path
    pub fn hash(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            kind: PartitionKind::Hash,
            version: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionKind {
    #[default]
    Hash,
    Range,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_mode: Option<IndexingMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_paths: Vec<IndexPath>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_paths: Vec<IndexPath>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_indexes: Vec<Vec<CompositePath>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spatial_indexes: Vec<SpatialSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexingMode {
    Consistent,
    Lazy,
    None,
}

/// An included or excluded path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPath {
    pub path: String,
}

impl IndexPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositePath {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<CompositePathSortOrder>,
}

impl CompositePath {
    pub fn new(path: impl Into<String>, order: CompositePathSortOrder) -> Self {
        Self {
            path: path.into(),
            order: Some(order),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositePathSortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialSpec {
    pub path: String,
    pub types: Vec<SpatialType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialType {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

pub type GremlinDatabaseCreateUpdateParameters = CreateUpdateParameters<GremlinDatabaseResource>;
pub type GremlinDatabaseGetResults = GetResults<GremlinDatabaseResource>;
pub type GremlinGraphCreateUpdateParameters = CreateUpdateParameters<GremlinGraphResource>;
pub type GremlinGraphGetResults = GetResults<GremlinGraphResource>;

/// Databases and graphs of a Gremlin API account
#[derive(Debug, Clone)]
pub struct GremlinResourcesClient {
    client: ArmClient,
}

impl GremlinResourcesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn database_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!(
            "/gremlinDatabases/{}{}",
            path_param("database_name", database_name)?,
            rest
        );
        account_url(&self.client, resource_group_name, account_name, &rest)
    }

    fn graph_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        graph_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!("/graphs/{}{}", path_param("graph_name", graph_name)?, rest);
        self.database_url(resource_group_name, account_name, database_name, &rest)
    }

    pub fn list_databases(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<PageSequence<GremlinDatabaseGetResults>> {
        let url = account_url(&self.client, resource_group_name, account_name, "/gremlinDatabases")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_database(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<GremlinDatabaseGetResults> {
        let url = self.database_url(resource_group_name, account_name, database_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_database(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        parameters: &GremlinDatabaseCreateUpdateParameters,
    ) -> Result<Operation<GremlinDatabaseGetResults>> {
        let url = self.database_url(resource_group_name, account_name, database_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_database(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.database_url(resource_group_name, account_name, database_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_database_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.database_url(resource_group_name, account_name, database_name, THROUGHPUT)?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub fn list_graphs(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<PageSequence<GremlinGraphGetResults>> {
        let url = self.database_url(resource_group_name, account_name, database_name, "/graphs")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_graph(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        graph_name: &str,
    ) -> Result<GremlinGraphGetResults> {
        let url = self.graph_url(resource_group_name, account_name, database_name, graph_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_graph(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        graph_name: &str,
        parameters: &GremlinGraphCreateUpdateParameters,
    ) -> Result<Operation<GremlinGraphGetResults>> {
        let url = self.graph_url(resource_group_name, account_name, database_name, graph_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_graph(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        graph_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.graph_url(resource_group_name, account_name, database_name, graph_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_graph_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        graph_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.graph_url(
            resource_group_name,
            account_name,
            database_name,
            graph_name,
            THROUGHPUT,
        )?;
        self.client.send_json(&Request::get(url), &[200]).await
    }
}
