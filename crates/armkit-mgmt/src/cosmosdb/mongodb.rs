//! MongoDB API databases and collections

use super::child_resources::{
    CreateUpdateParameters, GetResults, THROUGHPUT, ThroughputSettingsGetResults, account_url,
};
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{Method, NoContent, Operation, PageSequence, Request, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoDbDatabaseResource {
    pub id: String,
}

impl MongoDbDatabaseResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoDbCollectionResource {
    pub id: String,
    /// Shard key path to kind, e.g. `{"userId": "Hash"}`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub shard_key: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<MongoIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytical_storage_ttl: Option<i64>,
}

impl MongoDbCollectionResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoIndex {
    pub key: MongoIndexKeys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<MongoIndexOptions>,
}

impl MongoIndex {
    /// Index over `keys`, in order
    pub fn on<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: MongoIndexKeys {
                keys: keys.into_iter().map(Into::into).collect(),
            },
            options: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoIndexKeys {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoIndexOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_after_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

pub type MongoDbDatabaseCreateUpdateParameters = CreateUpdateParameters<MongoDbDatabaseResource>;
pub type MongoDbDatabaseGetResults = GetResults<MongoDbDatabaseResource>;
pub type MongoDbCollectionCreateUpdateParameters = CreateUpdateParameters<MongoDbCollectionResource>;
pub type MongoDbCollectionGetResults = GetResults<MongoDbCollectionResource>;

/// Databases and collections of a MongoDB API account
#[derive(Debug, Clone)]
pub struct MongoDbResourcesClient {
    client: ArmClient,
}

impl MongoDbResourcesClient {
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
            "/mongodbDatabases/{}{}",
            path_param("database_name", database_name)?,
            rest
        );
        account_url(&self.client, resource_group_name, account_name, &rest)
    }

    fn collection_url(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        collection_name: &str,
        rest: &str,
    ) -> Result<Url> {
        let rest = format!(
            "/collections/{}{}",
            path_param("collection_name", collection_name)?,
            rest
        );
        self.database_url(resource_group_name, account_name, database_name, &rest)
    }

    pub fn list_databases(
        &self,
        resource_group_name: &str,
        account_name: &str,
    ) -> Result<PageSequence<MongoDbDatabaseGetResults>> {
        let url = account_url(&self.client, resource_group_name, account_name, "/mongodbDatabases")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_database(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<MongoDbDatabaseGetResults> {
        let url = self.database_url(resource_group_name, account_name, database_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_database(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        parameters: &MongoDbDatabaseCreateUpdateParameters,
    ) -> Result<Operation<MongoDbDatabaseGetResults>> {
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

    pub fn list_collections(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
    ) -> Result<PageSequence<MongoDbCollectionGetResults>> {
        let url =
            self.database_url(resource_group_name, account_name, database_name, "/collections")?;
        Ok(self.client.pages(url, super::API_VERSION))
    }

    pub async fn get_collection(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        collection_name: &str,
    ) -> Result<MongoDbCollectionGetResults> {
        let url = self.collection_url(
            resource_group_name,
            account_name,
            database_name,
            collection_name,
            "",
        )?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub async fn begin_create_update_collection(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        collection_name: &str,
        parameters: &MongoDbCollectionCreateUpdateParameters,
    ) -> Result<Operation<MongoDbCollectionGetResults>> {
        let url = self.collection_url(
            resource_group_name,
            account_name,
            database_name,
            collection_name,
            "",
        )?;
        let request = Request::new(Method::PUT, url).with_json(parameters)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete_collection(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        collection_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.collection_url(
            resource_group_name,
            account_name,
            database_name,
            collection_name,
            "",
        )?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    pub async fn get_collection_throughput(
        &self,
        resource_group_name: &str,
        account_name: &str,
        database_name: &str,
        collection_name: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let url = self.collection_url(
            resource_group_name,
            account_name,
            database_name,
            collection_name,
            THROUGHPUT,
        )?;
        self.client.send_json(&Request::get(url), &[200]).await
    }
}
