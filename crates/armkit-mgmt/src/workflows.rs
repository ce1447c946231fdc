//! Workflows - start an operation and wait for it
//!
//! These compose a `begin_*` call with the poller, using the client's
//! polling settings unless a timeout is given.

use crate::client::ArmClient;
use crate::compute::{Disk, DisksClient};
use crate::cosmosdb::{DatabaseAccount, DatabaseAccountCreateUpdateParameters, DatabaseAccountsClient};
use armkit_core::{ProgressCallback, Result, WaitOptions};
use std::time::Duration;
use tracing::info;

fn wait_options(
    client: &ArmClient,
    timeout: Option<Duration>,
    on_progress: Option<ProgressCallback>,
) -> WaitOptions {
    let mut options = client.wait_options();
    if let Some(timeout) = timeout {
        options = options.timeout(timeout);
    }
    if let Some(callback) = on_progress {
        options = options.on_progress(callback);
    }
    options
}

/// Create or replace a disk and wait for completion
///
/// This is a convenience workflow that:
/// 1. Sends the PUT (returns an operation)
/// 2. Polls the operation until it is terminal
/// 3. Returns the final disk, reading it back if the service sent no body
///
/// # Example
///
/// ```rust,ignore
/// use armkit_mgmt::compute::Disk;
/// use armkit_mgmt::workflows::create_disk_and_wait;
/// use std::time::Duration;
///
/// let disk = create_disk_and_wait(
///     &client,
///     "my-rg",
///     "data-disk-1",
///     &Disk::empty("westus", 128),
///     Some(Duration::from_secs(600)),
///     None,  // No progress callback
/// ).await?;
/// ```
pub async fn create_disk_and_wait(
    client: &ArmClient,
    resource_group_name: &str,
    disk_name: &str,
    disk: &Disk,
    timeout: Option<Duration>,
    on_progress: Option<ProgressCallback>,
) -> Result<Disk> {
    let disks = DisksClient::new(client.clone());
    let options = wait_options(client, timeout, on_progress);

    let operation = disks
        .begin_create_or_update(resource_group_name, disk_name, disk)
        .await?;
    match operation.wait(&options).await? {
        Some(disk) => Ok(disk),
        None => {
            info!(disk_name, "Operation finished without a body; reading disk back");
            disks.get(resource_group_name, disk_name).await
        }
    }
}

/// Delete a disk and wait for completion
pub async fn delete_disk_and_wait(
    client: &ArmClient,
    resource_group_name: &str,
    disk_name: &str,
    timeout: Option<Duration>,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    let disks = DisksClient::new(client.clone());
    let options = wait_options(client, timeout, on_progress);

    disks
        .begin_delete(resource_group_name, disk_name)
        .await?
        .wait(&options)
        .await?;
    Ok(())
}

/// Create or replace a Cosmos DB account and wait for completion
pub async fn create_database_account_and_wait(
    client: &ArmClient,
    resource_group_name: &str,
    account_name: &str,
    parameters: &DatabaseAccountCreateUpdateParameters,
    timeout: Option<Duration>,
    on_progress: Option<ProgressCallback>,
) -> Result<DatabaseAccount> {
    let accounts = DatabaseAccountsClient::new(client.clone());
    let options = wait_options(client, timeout, on_progress);

    let operation = accounts
        .begin_create_or_update(resource_group_name, account_name, parameters)
        .await?;
    match operation.wait(&options).await? {
        Some(account) => Ok(account),
        None => accounts.get(resource_group_name, account_name).await,
    }
}

/// Delete a Cosmos DB account and wait for completion
pub async fn delete_database_account_and_wait(
    client: &ArmClient,
    resource_group_name: &str,
    account_name: &str,
    timeout: Option<Duration>,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    let accounts = DatabaseAccountsClient::new(client.clone());
    let options = wait_options(client, timeout, on_progress);

    accounts
        .begin_delete(resource_group_name, account_name)
        .await?
        .wait(&options)
        .await?;
    Ok(())
}
