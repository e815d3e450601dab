//! Validated project specification

use crate::error::Result;
use crate::executor::Executor;
use crate::validation;
use crate::value::{PropertyMap, PropertyValue};

/// Template namespace used when none is given
pub const DEFAULT_COOKBOOK: &str = "rundeck-server";

/// A project to materialize under `<datadir>/projects/<name>`
///
/// Only constructed through [`ProjectSpecBuilder::build`] (or a manifest),
/// so every instance has passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpec {
    name: String,
    executor: Executor,
    scm_import: Option<PropertyMap>,
    sources: Vec<PropertyMap>,
    properties: PropertyMap,
    cookbook: String,
}

impl ProjectSpec {
    /// Start building a specification for `name`
    pub fn builder(name: impl Into<String>) -> ProjectSpecBuilder {
        ProjectSpecBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// SCM import overrides, `None` when SCM import is disabled
    pub fn scm_import(&self) -> Option<&PropertyMap> {
        self.scm_import.as_ref()
    }

    /// Node sources, numbered from 1 in the output
    pub fn sources(&self) -> &[PropertyMap] {
        &self.sources
    }

    /// Pass-through properties, lowest precedence
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn cookbook(&self) -> &str {
        &self.cookbook
    }

    /// Handle for operations that only need the name
    pub fn project_ref(&self) -> ProjectRef {
        ProjectRef {
            name: self.name.clone(),
        }
    }
}

/// Builder for [`ProjectSpec`]
#[derive(Debug, Clone)]
pub struct ProjectSpecBuilder {
    name: String,
    executor: Executor,
    scm_import: Option<PropertyMap>,
    sources: Vec<PropertyMap>,
    properties: PropertyMap,
    cookbook: String,
}

impl ProjectSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executor: Executor::default(),
            scm_import: None,
            sources: Vec::new(),
            properties: PropertyMap::new(),
            cookbook: DEFAULT_COOKBOOK.to_string(),
        }
    }

    pub fn executor(mut self, executor: impl Into<Executor>) -> Self {
        self.executor = executor.into();
        self
    }

    /// Enable SCM import with the given overrides (keys without the `scm.import.` prefix)
    pub fn scm_import(mut self, overrides: PropertyMap) -> Self {
        self.scm_import = Some(overrides);
        self
    }

    /// Append a node source
    pub fn source(mut self, source: PropertyMap) -> Self {
        self.sources.push(source);
        self
    }

    /// Replace all node sources
    pub fn sources(mut self, sources: Vec<PropertyMap>) -> Self {
        self.sources = sources;
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn cookbook(mut self, cookbook: impl Into<String>) -> Self {
        self.cookbook = cookbook.into();
        self
    }

    /// Validate every field and freeze the specification
    pub fn build(self) -> Result<ProjectSpec> {
        validation::validate_name(&self.name)?;
        validation::validate_executor(&self.executor)?;
        validation::validate_sources(&self.sources)?;
        validation::validate_cookbook(&self.cookbook)?;

        Ok(ProjectSpec {
            name: self.name,
            executor: self.executor,
            scm_import: self.scm_import,
            sources: self.sources,
            properties: self.properties,
            cookbook: self.cookbook,
        })
    }
}

/// Validated project name, all `delete` needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    name: String,
}

impl ProjectRef {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validation::validate_name(&name)?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
