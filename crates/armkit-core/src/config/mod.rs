//! Configuration and profile management
//!
// Allow nested config module - this is intentional for the config subsystem

#![allow(clippy::module_inception)]
//!
//! Profiles name an ARM endpoint and subscription together with the polling
//! and HTTP settings used against them.
//!
//! # Features
//!
//! - Multiple named profiles with a default
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

pub mod config;
pub mod error;
pub mod polling;

pub use config::{Config, DEFAULT_ENDPOINT, Profile};
pub use error::{ConfigError, Result};
pub use polling::{HttpConfig, PollingConfig};
