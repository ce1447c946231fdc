use super::models::Usage;
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{PageSequence, Result};

/// Storage quota usage per region
#[derive(Debug, Clone)]
pub struct UsagesClient {
    client: ArmClient,
}

impl UsagesClient {
    pub const API_VERSION: &'static str = "2019-06-01";

    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// Usage counters for `location`, e.g. `westus`
    pub fn list_by_location(&self, location: &str) -> Result<PageSequence<Usage>> {
        let path = self.client.subscription_path(&format!(
            "/providers/Microsoft.Storage/locations/{}/usages",
            path_param("location", location)?
        ));
        let url = self.client.url(&path, Self::API_VERSION)?;
        Ok(self.client.pages(url, Self::API_VERSION))
    }
}
