use super::API_VERSION;
use super::models::ProviderOperation;
use crate::client::ArmClient;
use armkit_core::{PageSequence, Result};

/// Lists the operations the Cosmos DB provider exposes
#[derive(Debug, Clone)]
pub struct OperationsClient {
    client: ArmClient,
}

impl OperationsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<PageSequence<ProviderOperation>> {
        let url = self
            .client
            .url("/providers/Microsoft.DocumentDB/operations", API_VERSION)?;
        Ok(self.client.pages(url, API_VERSION))
    }
}
