use super::models::HubVirtualNetworkConnection;
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{Method, NoContent, Operation, PageSequence, Request, Result};
use url::Url;

/// Connections between a virtual hub and spoke virtual networks
#[derive(Debug, Clone)]
pub struct HubVirtualNetworkConnectionsClient {
    client: ArmClient,
}

impl HubVirtualNetworkConnectionsClient {
    pub const API_VERSION: &'static str = "2020-04-01";

    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn connections_url(
        &self,
        resource_group_name: &str,
        virtual_hub_name: &str,
        connection_name: Option<&str>,
    ) -> Result<Url> {
        let mut rest = format!(
            "/resourceGroups/{}/providers/Microsoft.Network/virtualHubs/{}/hubVirtualNetworkConnections",
            path_param("resource_group_name", resource_group_name)?,
            path_param("virtual_hub_name", virtual_hub_name)?,
        );
        if let Some(name) = connection_name {
            rest.push('/');
            rest.push_str(&path_param("connection_name", name)?);
        }
        let path = self.client.subscription_path(&rest);
        self.client.url(&path, Self::API_VERSION)
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        virtual_hub_name: &str,
        connection_name: &str,
    ) -> Result<HubVirtualNetworkConnection> {
        let url = self.connections_url(resource_group_name, virtual_hub_name, Some(connection_name))?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    pub fn list(
        &self,
        resource_group_name: &str,
        virtual_hub_name: &str,
    ) -> Result<PageSequence<HubVirtualNetworkConnection>> {
        let url = self.connections_url(resource_group_name, virtual_hub_name, None)?;
        Ok(self.client.pages(url, Self::API_VERSION))
    }

    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        virtual_hub_name: &str,
        connection_name: &str,
        connection: &HubVirtualNetworkConnection,
    ) -> Result<Operation<HubVirtualNetworkConnection>> {
        let url = self.connections_url(resource_group_name, virtual_hub_name, Some(connection_name))?;
        let request = Request::new(Method::PUT, url).with_json(connection)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        virtual_hub_name: &str,
        connection_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.connections_url(resource_group_name, virtual_hub_name, Some(connection_name))?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }
}
