//! # armkit-mgmt
//!
//! Resource-management clients built on `armkit-core`. Each service module
//! exposes a client per resource type: reads return values, listings return
//! lazy [`PageSequence`](armkit_core::PageSequence)s, and mutations return an
//! [`Operation`](armkit_core::Operation) to poll or wait on.
//!
//! ## Example
//!
//! ```rust,ignore
//! use armkit_core::config::Config;
//! use armkit_mgmt::ArmClient;
//! use armkit_mgmt::compute::{Disk, DisksClient};
//!
//! let client = ArmClient::from_config(&Config::load()?, None)?;
//! let disks = DisksClient::new(client.clone());
//!
//! let op = disks.begin_create_or_update("rg", "disk1", &Disk::empty("westus", 64)).await?;
//! let disk = op.wait(&client.wait_options()).await?;
//! ```

pub mod client;
pub mod compute;
pub mod cosmosdb;
pub mod keyvault;
pub mod network;
pub mod storage;
pub mod workflows;

pub use client::ArmClient;
