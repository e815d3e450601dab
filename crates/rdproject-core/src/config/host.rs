//! Host-level settings shared by every project operation

use crate::error::{Error, Result};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Default project storage root of the orchestration server
pub const DEFAULT_DATADIR: &str = "/var/lib/rundeck";

/// Default server base directory
pub const DEFAULT_BASEDIR: &str = "/var/lib/rundeck";

/// Service account owning every generated directory and file
pub const SERVICE_IDENTITY: &str = "rundeck";

/// Host configuration as read from defaults, config file and environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HostConfig {
    /// Project storage root (`<datadir>/projects/<name>`)
    pub datadir: Utf8PathBuf,

    /// Server base directory, used to locate the default SSH key
    pub basedir: Utf8PathBuf,

    /// User owning generated files
    pub owner: String,

    /// Group owning generated files
    pub group: String,

    /// Apply owner and group to generated files (requires privileges)
    pub manage_ownership: bool,

    /// On-disk template namespaces, searched before the embedded ones
    pub templates_dir: Option<Utf8PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            datadir: Utf8PathBuf::from(DEFAULT_DATADIR),
            basedir: Utf8PathBuf::from(DEFAULT_BASEDIR),
            owner: SERVICE_IDENTITY.to_string(),
            group: SERVICE_IDENTITY.to_string(),
            manage_ownership: true,
            templates_dir: None,
        }
    }
}

impl HostConfig {
    /// Check the invariants the project operations rely on
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [("datadir", &self.datadir), ("basedir", &self.basedir)] {
            if !path.is_absolute() {
                return Err(Error::invalid_config(format!(
                    "{} must be an absolute path, got '{}'",
                    field, path
                )));
            }
        }

        if self.manage_ownership && (self.owner.is_empty() || self.group.is_empty()) {
            return Err(Error::invalid_config(
                "owner and group must be set when manage-ownership is enabled",
            ));
        }

        Ok(())
    }

    /// Directories handed to the project operations
    pub fn paths(&self) -> HostPaths {
        HostPaths::new(self.datadir.clone(), self.basedir.clone())
    }

    /// Ownership to apply, or `None` when ownership is not managed
    pub fn ownership(&self) -> Option<Ownership> {
        self.manage_ownership
            .then(|| Ownership::new(self.owner.clone(), self.group.clone()))
    }
}

/// Explicit host directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    pub datadir: Utf8PathBuf,
    pub basedir: Utf8PathBuf,
}

impl HostPaths {
    pub fn new(datadir: impl Into<Utf8PathBuf>, basedir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            datadir: datadir.into(),
            basedir: basedir.into(),
        }
    }

    /// `<datadir>/projects`
    pub fn projects_dir(&self) -> Utf8PathBuf {
        self.datadir.join("projects")
    }

    /// `<datadir>/projects/<name>`
    pub fn project_dir(&self, name: &str) -> Utf8PathBuf {
        self.projects_dir().join(name)
    }

    /// Private key the server uses for SSH node execution
    pub fn ssh_key_path(&self) -> Utf8PathBuf {
        self.basedir.join(".ssh").join("id_rsa")
    }
}

/// Owner and group applied to generated directories and files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub user: String,
    pub group: String,
}

impl Ownership {
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            group: group.into(),
        }
    }

    /// The fixed service identity
    pub fn service() -> Self {
        Self::new(SERVICE_IDENTITY, SERVICE_IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.datadir, Utf8PathBuf::from("/var/lib/rundeck"));
        assert_eq!(config.ownership(), Some(Ownership::service()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_datadir_rejected() {
        let config = HostConfig {
            datadir: Utf8PathBuf::from("data"),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("datadir"));
    }

    #[test]
    fn test_ownership_disabled() {
        let config = HostConfig {
            manage_ownership: false,
            owner: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.ownership(), None);
    }

    #[test]
    fn test_host_paths() {
        let paths = HostPaths::new("/srv/rd/data", "/srv/rd");
        assert_eq!(
            paths.project_dir("web"),
            Utf8PathBuf::from("/srv/rd/data/projects/web")
        );
        assert_eq!(paths.ssh_key_path(), Utf8PathBuf::from("/srv/rd/.ssh/id_rsa"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: HostConfig = serde_yaml_ng::from_str("datadir: /data\n").unwrap();
        assert_eq!(config.datadir, Utf8PathBuf::from("/data"));
        assert_eq!(config.basedir, Utf8PathBuf::from(DEFAULT_BASEDIR));
        assert!(config.manage_ownership);
    }
}
