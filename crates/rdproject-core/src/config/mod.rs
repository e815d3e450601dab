//! Host configuration and its layered loader

mod host;
mod loader;

pub use host::{HostConfig, HostPaths, Ownership, DEFAULT_BASEDIR, DEFAULT_DATADIR, SERVICE_IDENTITY};
pub use loader::{ConfigLoader, CONFIG_FILE_NAME, ENV_PREFIX};
