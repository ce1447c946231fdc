//! Key Vault access control (data plane)

pub mod models;
mod role_definitions;

pub use models::{Permission, RoleDefinition, RoleDefinitionFilter, RoleDefinitionProperties};
pub use role_definitions::RoleDefinitionsClient;
