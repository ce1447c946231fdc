use super::models::{AccessUri, Disk, DiskUpdate, GrantAccessData};
use crate::client::ArmClient;
use armkit_core::http::path_param;
use armkit_core::{Method, NoContent, Operation, PageSequence, Request, Result};
use url::Url;

/// Managed disk operations
#[derive(Debug, Clone)]
pub struct DisksClient {
    client: ArmClient,
}

impl DisksClient {
    pub const API_VERSION: &'static str = "2019-11-01";

    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn disk_url(&self, resource_group_name: &str, disk_name: &str, action: &str) -> Result<Url> {
        let path = self.client.subscription_path(&format!(
            "/resourceGroups/{}/providers/Microsoft.Compute/disks/{}{}",
            path_param("resource_group_name", resource_group_name)?,
            path_param("disk_name", disk_name)?,
            action
        ));
        self.client.url(&path, Self::API_VERSION)
    }

    /// Get a disk
    pub async fn get(&self, resource_group_name: &str, disk_name: &str) -> Result<Disk> {
        let url = self.disk_url(resource_group_name, disk_name, "")?;
        self.client.send_json(&Request::get(url), &[200]).await
    }

    /// All disks in the subscription
    pub fn list(&self) -> Result<PageSequence<Disk>> {
        let path = self
            .client
            .subscription_path("/providers/Microsoft.Compute/disks");
        let url = self.client.url(&path, Self::API_VERSION)?;
        Ok(self.client.pages(url, Self::API_VERSION))
    }

    /// All disks in one resource group
    pub fn list_by_resource_group(&self, resource_group_name: &str) -> Result<PageSequence<Disk>> {
        let path = self.client.subscription_path(&format!(
            "/resourceGroups/{}/providers/Microsoft.Compute/disks",
            path_param("resource_group_name", resource_group_name)?
        ));
        let url = self.client.url(&path, Self::API_VERSION)?;
        Ok(self.client.pages(url, Self::API_VERSION))
    }

    /// Create or replace a disk
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        disk_name: &str,
        disk: &Disk,
    ) -> Result<Operation<Disk>> {
        let url = self.disk_url(resource_group_name, disk_name, "")?;
        let request = Request::new(Method::PUT, url).with_json(disk)?;
        self.client.begin(request).await
    }

    /// Patch a disk
    pub async fn begin_update(
        &self,
        resource_group_name: &str,
        disk_name: &str,
        disk: &DiskUpdate,
    ) -> Result<Operation<Disk>> {
        let url = self.disk_url(resource_group_name, disk_name, "")?;
        let request = Request::new(Method::PATCH, url).with_json(disk)?;
        self.client.begin(request).await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        disk_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.disk_url(resource_group_name, disk_name, "")?;
        self.client.begin(Request::new(Method::DELETE, url)).await
    }

    /// Grant a time-limited SAS for reading or writing the disk's blob
    pub async fn begin_grant_access(
        &self,
        resource_group_name: &str,
        disk_name: &str,
        grant_access_data: &GrantAccessData,
    ) -> Result<Operation<AccessUri>> {
        let url = self.disk_url(resource_group_name, disk_name, "/beginGetAccess")?;
        let request = Request::new(Method::POST, url).with_json(grant_access_data)?;
        self.client.begin(request).await
    }

    /// Revoke a previously granted SAS
    pub async fn begin_revoke_access(
        &self,
        resource_group_name: &str,
        disk_name: &str,
    ) -> Result<Operation<NoContent>> {
        let url = self.disk_url(resource_group_name, disk_name, "/endGetAccess")?;
        self.client.begin(Request::new(Method::POST, url)).await
    }
}
