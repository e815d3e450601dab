//! What `create` will write, computed without touching the filesystem

use crate::error::Result;
use crate::executor::ProviderConfig;
use crate::scm;
use crate::spec::ProjectSpec;
use crate::value::PropertyMap;
use camino::{Utf8Path, Utf8PathBuf};
use rdproject_core::HostPaths;
use tracing::debug;

pub const PROJECT_PROPERTIES_FILE: &str = "project.properties";
pub const SCM_IMPORT_PROPERTIES_FILE: &str = "scm-import.properties";

/// Template rendering both property files
pub const PROPERTIES_TEMPLATE: &str = "properties.tera";

pub const PROJECT_NAME_KEY: &str = "project.name";
pub const NODE_EXECUTOR_PROVIDER_KEY: &str = "service.NodeExecutor.default.provider";
pub const FILE_COPIER_PROVIDER_KEY: &str = "service.FileCopier.default.provider";
pub const FILE_COPIER_PROVIDER: &str = "jsch-scp";

/// On-disk footprint of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: Utf8PathBuf,
    pub etc_dir: Utf8PathBuf,
    pub var_dir: Utf8PathBuf,
    pub scm_dir: Utf8PathBuf,
    pub project_properties: Utf8PathBuf,
    pub scm_import_properties: Utf8PathBuf,
}

impl ProjectLayout {
    pub fn new(paths: &HostPaths, name: &str) -> Self {
        let root = paths.project_dir(name);
        let etc_dir = root.join("etc");
        Self {
            var_dir: root.join("var"),
            scm_dir: root.join("scm"),
            project_properties: etc_dir.join(PROJECT_PROPERTIES_FILE),
            scm_import_properties: etc_dir.join(SCM_IMPORT_PROPERTIES_FILE),
            etc_dir,
            root,
        }
    }
}

/// Everything `create` writes for one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPlan {
    pub layout: ProjectLayout,
    /// Contents of `etc/project.properties`
    pub properties: PropertyMap,
    /// Contents of `etc/scm-import.properties`, when SCM import is enabled
    pub scm_import: Option<PropertyMap>,
    /// Template namespace used for rendering
    pub cookbook: String,
}

impl ProjectPlan {
    /// Resolve the executor and flatten the specification
    ///
    /// Fails with an unsupported-feature error for executor templates that
    /// cannot be resolved, before anything is written.
    pub fn build(spec: &ProjectSpec, paths: &HostPaths) -> Result<Self> {
        let layout = ProjectLayout::new(paths, spec.name());
        let executor = spec.executor().resolve(paths)?;

        let scm_import = spec
            .scm_import()
            .map(|overrides| scm::scm_import_properties(&layout.scm_dir, overrides));

        let properties = project_properties(spec, &executor);
        debug!(
            "Planned {} properties for project {} (scm import: {})",
            properties.len(),
            spec.name(),
            scm_import.is_some()
        );

        Ok(Self {
            layout,
            properties,
            scm_import,
            cookbook: spec.cookbook().to_string(),
        })
    }

    /// Directories to ensure, in creation order
    pub fn directories(&self) -> Vec<&Utf8Path> {
        let mut dirs = vec![self.layout.etc_dir.as_path(), self.layout.var_dir.as_path()];
        if self.scm_import.is_some() {
            dirs.push(self.layout.scm_dir.as_path());
        }
        dirs
    }

    /// Property files to render, in write order
    pub fn files(&self) -> Vec<(&Utf8Path, &PropertyMap)> {
        let mut files = Vec::new();
        if let Some(scm_import) = &self.scm_import {
            files.push((self.layout.scm_import_properties.as_path(), scm_import));
        }
        files.push((self.layout.project_properties.as_path(), &self.properties));
        files
    }
}

/// Flatten a specification into the `project.properties` map
///
/// Later writes win: user properties, then the project name, the executor,
/// the node sources, and finally the file copier.
pub fn project_properties(spec: &ProjectSpec, executor: &ProviderConfig) -> PropertyMap {
    let mut properties = PropertyMap::new();
    properties.merge(spec.properties());
    properties.set(PROJECT_NAME_KEY, spec.name());

    properties.set(NODE_EXECUTOR_PROVIDER_KEY, executor.provider.as_str());
    properties.merge_prefixed("project.", &executor.config);

    for (i, source) in spec.sources().iter().enumerate() {
        properties.merge_prefixed(&format!("resources.source.{}.", i + 1), source);
    }

    properties.set(FILE_COPIER_PROVIDER_KEY, FILE_COPIER_PROVIDER);
    properties
}
