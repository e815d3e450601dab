//! Common test utilities for rdproject-projects
//!
//! Provides:
//! - Scratch host directories backed by a temp dir
//! - A recording backend standing in for the filesystem collaborators
//! - Spec builders for the usual node sources

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use rdproject_core::HostPaths;
use rdproject_projects::{
    DirectoryEnsurer, DirectoryRemover, FileAttrs, ProjectConfigurator, PropertyMap,
    PropertyValue, RenderRequest, Result, TemplateRenderer,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Temp dir holding `data/` and `base/` host directories
pub struct TestHost {
    _temp_dir: TempDir,
    pub paths: HostPaths,
}

impl TestHost {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("Invalid UTF-8 path");
        Self {
            _temp_dir: temp_dir,
            paths: HostPaths::new(root.join("data"), root.join("base")),
        }
    }

    /// Configurator writing into this host, without ownership changes
    pub fn configurator(&self) -> ProjectConfigurator {
        ProjectConfigurator::local(self.paths.clone(), None, None)
    }

    pub fn project_dir(&self, name: &str) -> Utf8PathBuf {
        self.paths.project_dir(name)
    }

    /// Parsed `etc/<file>` of a project
    pub fn read_properties(&self, name: &str, file: &str) -> BTreeMap<String, String> {
        let path = self.project_dir(name).join("etc").join(file);
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path, e));
        rdproject_projects::parse_properties(&text)
    }
}

/// Collaborator call observed by the recording backend
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    EnsureDir {
        path: Utf8PathBuf,
        mode: u32,
        recursive: bool,
    },
    Render {
        dest: Utf8PathBuf,
        template: String,
        namespace: String,
        mode: u32,
        properties: PropertyMap,
    },
    RemoveDir {
        path: Utf8PathBuf,
        recursive: bool,
    },
}

/// Records every collaborator call instead of touching the filesystem
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    operations: Arc<Mutex<Vec<Operation>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.operations.lock().unwrap().clone()
    }

    pub fn is_untouched(&self) -> bool {
        self.operations.lock().unwrap().is_empty()
    }

    /// Configurator whose collaborators all record into this backend
    pub fn configurator(&self, paths: HostPaths) -> ProjectConfigurator {
        ProjectConfigurator::new(
            paths,
            None,
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
    }

    fn record(&self, operation: Operation) {
        self.operations.lock().unwrap().push(operation);
    }
}

impl DirectoryEnsurer for RecordingBackend {
    fn ensure_dir(&self, path: &Utf8Path, attrs: &FileAttrs, recursive: bool) -> Result<()> {
        self.record(Operation::EnsureDir {
            path: path.to_owned(),
            mode: attrs.mode,
            recursive,
        });
        Ok(())
    }
}

impl TemplateRenderer for RecordingBackend {
    fn render(&self, dest: &Utf8Path, request: &RenderRequest<'_>) -> Result<()> {
        self.record(Operation::Render {
            dest: dest.to_owned(),
            template: request.template.to_string(),
            namespace: request.namespace.to_string(),
            mode: request.attrs.mode,
            properties: request.properties.clone(),
        });
        Ok(())
    }
}

impl DirectoryRemover for RecordingBackend {
    fn remove_dir(&self, path: &Utf8Path, recursive: bool) -> Result<()> {
        self.record(Operation::RemoveDir {
            path: path.to_owned(),
            recursive,
        });
        Ok(())
    }
}

/// `{type: url, config.url: <url>}`
pub fn url_source(url: &str) -> PropertyMap {
    [
        ("type", PropertyValue::from("url")),
        ("config.url", PropertyValue::from(url)),
    ]
    .into_iter()
    .collect()
}
