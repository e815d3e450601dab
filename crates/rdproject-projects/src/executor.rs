//! Node executor selection and template resolution

use crate::error::{Error, Result};
use crate::value::PropertyMap;
use rdproject_core::HostPaths;
use std::fmt;

/// Provider the `ssh` template resolves to
pub const SSH_PROVIDER: &str = "jsch-ssh";

/// Executor shorthand naming a built-in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorTemplate {
    Ssh,
    Winrm,
    /// Tag outside the known set, rejected on resolution
    Unknown(String),
}

impl ExecutorTemplate {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ssh => "ssh",
            Self::Winrm => "winrm",
            Self::Unknown(tag) => tag,
        }
    }

    /// Expand the template into a full provider configuration
    pub fn resolve(&self, paths: &HostPaths) -> Result<ProviderConfig> {
        match self {
            Self::Ssh => {
                let mut config = PropertyMap::new();
                config.set("ssh-authentication", "privateKey");
                config.set("ssh-keypath", paths.ssh_key_path().to_string());
                Ok(ProviderConfig::new(SSH_PROVIDER, config))
            }
            Self::Winrm => Err(Error::unsupported_feature(
                "WinRM template not yet supported",
            )),
            Self::Unknown(tag) => Err(Error::unsupported_feature(format!(
                "Unknown executor template: {}",
                tag
            ))),
        }
    }
}

impl From<&str> for ExecutorTemplate {
    fn from(tag: &str) -> Self {
        match tag {
            "ssh" => Self::Ssh,
            "winrm" => Self::Winrm,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ExecutorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node executor provider and its settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub provider: String,
    pub config: PropertyMap,
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, config: PropertyMap) -> Self {
        Self {
            provider: provider.into(),
            config,
        }
    }
}

/// Executor of a project: a template shorthand or an explicit configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Executor {
    Template(ExecutorTemplate),
    Explicit(ProviderConfig),
}

impl Executor {
    /// Provider configuration to write, expanding templates
    pub fn resolve(&self, paths: &HostPaths) -> Result<ProviderConfig> {
        match self {
            Self::Template(template) => template.resolve(paths),
            Self::Explicit(config) => Ok(config.clone()),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::Template(ExecutorTemplate::Ssh)
    }
}

impl From<ExecutorTemplate> for Executor {
    fn from(template: ExecutorTemplate) -> Self {
        Self::Template(template)
    }
}

impl From<ProviderConfig> for Executor {
    fn from(config: ProviderConfig) -> Self {
        Self::Explicit(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::PropertyValue;

    fn paths() -> HostPaths {
        HostPaths::new("/var/lib/rundeck/data", "/var/lib/rundeck")
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(ExecutorTemplate::from("ssh"), ExecutorTemplate::Ssh);
        assert_eq!(ExecutorTemplate::from("winrm"), ExecutorTemplate::Winrm);
        assert_eq!(
            ExecutorTemplate::from("telnet"),
            ExecutorTemplate::Unknown("telnet".to_string())
        );
    }

    #[test]
    fn test_resolve_ssh() {
        let config = ExecutorTemplate::Ssh.resolve(&paths()).unwrap();
        assert_eq!(config.provider, "jsch-ssh");
        assert_eq!(
            config.config.get("ssh-authentication"),
            Some(&PropertyValue::from("privateKey"))
        );
        assert_eq!(
            config.config.get("ssh-keypath"),
            Some(&PropertyValue::from("/var/lib/rundeck/.ssh/id_rsa"))
        );
        assert_eq!(config.config.len(), 2);
    }

    #[test]
    fn test_resolve_winrm_unsupported() {
        let err = ExecutorTemplate::Winrm.resolve(&paths()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
        assert!(err.to_string().contains("WinRM"));
    }

    #[test]
    fn test_resolve_unknown_names_tag() {
        let err = ExecutorTemplate::from("telnet")
            .resolve(&paths())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
        assert!(err.to_string().contains("telnet"));
    }

    #[test]
    fn test_explicit_used_as_is() {
        let mut settings = PropertyMap::new();
        settings.set("winrm-auth-type", "certificate");
        let explicit = ProviderConfig::new("overthere-winrm", settings);

        let resolved = Executor::from(explicit.clone()).resolve(&paths()).unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_default_is_ssh() {
        assert_eq!(Executor::default(), Executor::Template(ExecutorTemplate::Ssh));
    }
}
