//! Compute resource provider (`Microsoft.Compute`)

mod disks;
pub mod models;

pub use disks::DisksClient;
pub use models::{
    AccessLevel, AccessUri, CreationData, Disk, DiskCreateOption, DiskProperties, DiskSku,
    DiskState, DiskStorageAccountType, DiskUpdate, DiskUpdateProperties, GrantAccessData,
    OperatingSystemType,
};
