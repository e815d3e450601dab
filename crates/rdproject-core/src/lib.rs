//! # rdproject-core
//!
//! Core library for rdproject providing:
//! - Host configuration (data directory, base directory, service identity)
//! - Layered configuration loading (defaults, YAML file, environment)
//! - Shared error types

pub mod config;
pub mod error;

pub use config::{ConfigLoader, HostConfig, HostPaths, Ownership};
pub use error::{Error, Result};
