//! Cosmos DB resource provider (`Microsoft.DocumentDB`)
//!
//! Accounts are managed by [`DatabaseAccountsClient`]; the databases,
//! keyspaces, graphs, collections and tables inside an account are managed
//! by one client per API flavor.

mod cassandra;
mod child_resources;
mod database_accounts;
mod gremlin;
pub mod models;
mod mongodb;
mod operations;
mod table;

pub use cassandra::*;
pub use child_resources::{
    AutoscaleSettingsResource, CreateUpdateOptions, CreateUpdateParameters,
    CreateUpdateProperties, GetProperties, GetResults, Stored, ThroughputSettingsGetResults,
    ThroughputSettingsResource,
};
pub use database_accounts::DatabaseAccountsClient;
pub use gremlin::*;
pub use models::*;
pub use mongodb::*;
pub use operations::OperationsClient;
pub use table::*;

pub(crate) const API_VERSION: &str = "2020-04-01";
