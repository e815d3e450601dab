//! Project manifests: the YAML form of a project specification
//!
//! A manifest is loosely typed. Converting it into a
//! [`ProjectSpec`] is the validation boundary: keys are normalized to
//! strings, values must be scalars, and container shapes are checked.

use crate::error::{Error, Result};
use crate::executor::{Executor, ExecutorTemplate, ProviderConfig};
use crate::spec::{ProjectSpec, DEFAULT_COOKBOOK};
use crate::value::{PropertyMap, PropertyValue};
use camino::Utf8Path;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};
use tracing::{debug, warn};

/// Raw project manifest as written by the user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectManifest {
    /// Project name
    pub name: String,

    /// `ssh`, `winrm`, or `{provider, config}`; defaults to `ssh`
    #[serde(default)]
    pub executor: Option<Value>,

    /// `false` or a mapping of overrides
    #[serde(default, alias = "scm_import", alias = "scmImport")]
    pub scm_import: Option<Value>,

    /// Sequence of node source mappings
    #[serde(default)]
    pub sources: Option<Value>,

    /// Pass-through project properties
    #[serde(default)]
    pub properties: Option<Value>,

    /// Template namespace
    #[serde(default)]
    pub cookbook: Option<String>,
}

impl ProjectManifest {
    /// Parse a manifest from YAML (JSON is accepted too)
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Read and parse a manifest file
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        debug!("Reading project manifest {}", path);
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Validate the manifest and convert it into a specification
    pub fn into_spec(self) -> Result<ProjectSpec> {
        let mut builder = ProjectSpec::builder(self.name);

        if let Some(executor) = executor_from_value(self.executor.as_ref())? {
            builder = builder.executor(executor);
        }

        if let Some(overrides) = scm_import_from_value(self.scm_import.as_ref())? {
            builder = builder.scm_import(overrides);
        }

        builder = builder.sources(sources_from_value(self.sources.as_ref())?);

        if let Some(properties) = self.properties.as_ref() {
            if !properties.is_null() {
                builder = builder.properties(property_map("properties", properties)?);
            }
        }

        builder = builder.cookbook(self.cookbook.unwrap_or_else(|| DEFAULT_COOKBOOK.to_string()));

        builder.build()
    }
}

impl TryFrom<ProjectManifest> for ProjectSpec {
    type Error = Error;

    fn try_from(manifest: ProjectManifest) -> Result<Self> {
        manifest.into_spec()
    }
}

fn executor_from_value(value: Option<&Value>) -> Result<Option<Executor>> {
    let mapping = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(tag)) => {
            return Ok(Some(Executor::Template(ExecutorTemplate::from(tag.as_str()))))
        }
        Some(Value::Mapping(mapping)) => mapping,
        Some(_) => {
            return Err(Error::validation(
                "executor",
                "must be a template name or a {provider, config} mapping",
            ))
        }
    };

    for key in mapping.keys() {
        if !matches!(key.as_str(), Some("provider") | Some("config")) {
            warn!("Ignoring unexpected executor key: {:?}", key);
        }
    }

    let provider = match mapping.get("provider") {
        Some(Value::String(provider)) => provider.clone(),
        Some(Value::Null) | None => {
            return Err(Error::validation("executor", "must contain a provider"))
        }
        Some(_) => return Err(Error::validation("executor.provider", "must be a string")),
    };

    let config = match mapping.get("config") {
        Some(config @ Value::Mapping(_)) => property_map("executor.config", config)?,
        _ => {
            return Err(Error::validation(
                "executor",
                "must contain a config mapping",
            ))
        }
    };

    Ok(Some(Executor::Explicit(ProviderConfig::new(provider, config))))
}

fn scm_import_from_value(value: Option<&Value>) -> Result<Option<PropertyMap>> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(value @ Value::Mapping(_)) => Ok(Some(property_map("scm-import", value)?)),
        Some(_) => Err(Error::validation(
            "scm-import",
            "must be false or a mapping",
        )),
    }
}

fn sources_from_value(value: Option<&Value>) -> Result<Vec<PropertyMap>> {
    let entries = match value {
        Some(Value::Sequence(entries)) => entries,
        None | Some(Value::Null) => return Err(Error::validation("sources", "is required")),
        Some(_) => return Err(Error::validation("sources", "must be a sequence")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| property_map(&format!("sources[{}]", i), entry))
        .collect()
}

/// Convert a mapping of scalars into a property map
fn property_map(field: &str, value: &Value) -> Result<PropertyMap> {
    let Value::Mapping(mapping) = value else {
        return Err(Error::validation(field, "must be a mapping"));
    };

    mapping_entries(field, mapping)
}

fn mapping_entries(field: &str, mapping: &Mapping) -> Result<PropertyMap> {
    let mut map = PropertyMap::new();
    for (key, value) in mapping {
        let key = key_string(field, key)?;
        let value = scalar(&format!("{}.{}", field, key), value)?;
        map.set(key, value);
    }
    Ok(map)
}

/// String keys are kept, integer and boolean keys are normalized
fn key_string(field: &str, key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::validation(
            field,
            format!("keys must be strings, got {:?}", key),
        )),
    }
}

fn scalar(field: &str, value: &Value) -> Result<PropertyValue> {
    match value {
        Value::String(s) => Ok(PropertyValue::String(s.clone())),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PropertyValue::Integer(i))
            } else if n.is_u64() {
                // Larger than i64, keep the exact digits
                Ok(PropertyValue::String(n.to_string()))
            } else {
                n.as_f64()
                    .map(PropertyValue::Float)
                    .ok_or_else(|| Error::validation(field, "is not a representable number"))
            }
        }
        Value::Null => Err(Error::validation(field, "must not be null")),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err(Error::validation(field, "must be a scalar value"))
        }
        Value::Tagged(_) => Err(Error::validation(field, "tagged values are not supported")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn spec(yaml: &str) -> Result<ProjectSpec> {
        ProjectManifest::from_yaml(yaml)?.into_spec()
    }

    #[test]
    fn test_ssh_manifest() {
        let spec = spec(
            r#"
name: linux_servers
executor: ssh
sources:
  - type: url
    config.url: http://chef-bridge/linux
    config.timeout: 30
    config.cache: true
scm-import:
  config.strictHostKeyChecking: "no"
  roles.0: myrole
  roles.count: 1
"#,
        )
        .unwrap();

        assert_eq!(spec.name(), "linux_servers");
        assert_eq!(spec.executor(), &Executor::Template(ExecutorTemplate::Ssh));
        let source = &spec.sources()[0];
        assert_eq!(source.get("config.timeout"), Some(&PropertyValue::Integer(30)));
        assert_eq!(source.get("config.cache"), Some(&PropertyValue::Bool(true)));
        let scm = spec.scm_import().unwrap();
        assert_eq!(scm.get("roles.count"), Some(&PropertyValue::Integer(1)));
        assert_eq!(scm.len(), 3);
    }

    #[test]
    fn test_explicit_executor_manifest() {
        let spec = spec(
            r#"
name: windows_servers
executor:
  provider: overthere-winrm
  config:
    winrm-auth-type: certificate
    winrm-protocol: https
sources:
  - type: url
    config.url: http://url
properties:
  project.plugin.notification.PluginFoo.team: bar
"#,
        )
        .unwrap();

        let Executor::Explicit(config) = spec.executor() else {
            panic!("expected explicit executor");
        };
        assert_eq!(config.provider, "overthere-winrm");
        assert_eq!(config.config.len(), 2);
        assert_eq!(spec.properties().len(), 1);
        assert_eq!(spec.scm_import(), None);
    }

    #[test]
    fn test_defaults() {
        let spec = spec("name: web\nsources: []\n").unwrap();
        assert_eq!(spec.executor(), &Executor::default());
        assert_eq!(spec.cookbook(), "rundeck-server");
        assert!(spec.sources().is_empty());
    }

    #[test]
    fn test_scm_import_aliases_and_false() {
        let spec_a = spec("name: web\nsources: []\nscmImport: {}\n").unwrap();
        assert_eq!(spec_a.scm_import(), Some(&PropertyMap::new()));

        let spec_b = spec("name: web\nsources: []\nscm_import: false\n").unwrap();
        assert_eq!(spec_b.scm_import(), None);

        let err = spec("name: web\nsources: []\nscm-import: true\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_missing_sources() {
        let err = spec("name: web\n").unwrap_err();
        assert!(err.to_string().contains("sources"));
    }

    #[test]
    fn test_source_must_be_mapping() {
        let err = spec("name: web\nsources:\n  - url\n").unwrap_err();
        assert!(err.to_string().contains("sources[0]"));
    }

    #[test]
    fn test_executor_missing_provider() {
        let err = spec(
            "name: web\nsources: []\nexecutor:\n  config:\n    ssh-authentication: privateKey\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_executor_missing_config() {
        let err = spec("name: web\nsources: []\nexecutor:\n  provider: jsch-ssh\n").unwrap_err();
        assert!(err.to_string().contains("config"));
    }

    #[test]
    fn test_nested_value_rejected() {
        let err = spec("name: web\nsources:\n  - type: url\n    config:\n      url: http://x\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("sources[0].config"));
    }

    #[test]
    fn test_non_string_keys_normalized() {
        let spec = spec("name: web\nsources: []\nproperties:\n  1: one\n  true: yes-please\n")
            .unwrap();
        assert_eq!(
            spec.properties().get("1"),
            Some(&PropertyValue::from("one"))
        );
        assert!(spec.properties().contains_key("true"));
    }

    #[test]
    fn test_unknown_top_level_key() {
        let err = spec("name: web\nsources: []\nsource: []\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_bad_name() {
        let err = spec("name: my/project\nsources: []\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_json_manifest() {
        let spec = spec(r#"{"name": "web", "executor": "winrm", "sources": [{"type": "url"}]}"#)
            .unwrap();
        assert_eq!(spec.executor(), &Executor::Template(ExecutorTemplate::Winrm));
    }
}
