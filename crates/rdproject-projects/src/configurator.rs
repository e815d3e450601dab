//! Create and delete the on-disk configuration of a project

use crate::error::Result;
use crate::fs::{DirectoryEnsurer, DirectoryRemover, FileAttrs, LocalFilesystem};
use crate::plan::{ProjectLayout, ProjectPlan, PROPERTIES_TEMPLATE};
use crate::render::{RenderRequest, TemplateRenderer, TeraRenderer};
use crate::spec::{ProjectRef, ProjectSpec};
use camino::Utf8PathBuf;
use rdproject_core::{HostConfig, HostPaths, Ownership};
use tracing::info;

/// Materializes and removes projects under `<datadir>/projects`
///
/// Operations are not transactional: a failure part way through `create`
/// leaves what was already written, and re-running converges.
pub struct ProjectConfigurator {
    paths: HostPaths,
    ownership: Option<Ownership>,
    dirs: Box<dyn DirectoryEnsurer>,
    renderer: Box<dyn TemplateRenderer>,
    remover: Box<dyn DirectoryRemover>,
}

impl ProjectConfigurator {
    pub fn new(
        paths: HostPaths,
        ownership: Option<Ownership>,
        dirs: Box<dyn DirectoryEnsurer>,
        renderer: Box<dyn TemplateRenderer>,
        remover: Box<dyn DirectoryRemover>,
    ) -> Self {
        Self {
            paths,
            ownership,
            dirs,
            renderer,
            remover,
        }
    }

    /// Configurator writing to the local filesystem
    pub fn local(
        paths: HostPaths,
        ownership: Option<Ownership>,
        templates_dir: Option<Utf8PathBuf>,
    ) -> Self {
        let renderer = match templates_dir {
            Some(dir) => TeraRenderer::with_templates_dir(dir),
            None => TeraRenderer::new(),
        };

        Self::new(
            paths,
            ownership,
            Box::new(LocalFilesystem),
            Box::new(renderer),
            Box::new(LocalFilesystem),
        )
    }

    /// Local configurator from host configuration
    pub fn from_host_config(config: &HostConfig) -> Self {
        Self::local(
            config.paths(),
            config.ownership(),
            config.templates_dir.clone(),
        )
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    /// Compute what `create` would write
    pub fn plan(&self, spec: &ProjectSpec) -> Result<ProjectPlan> {
        ProjectPlan::build(spec, &self.paths)
    }

    /// Write the directories and property files of `spec`
    pub fn create(&self, spec: &ProjectSpec) -> Result<()> {
        let plan = self.plan(spec)?;
        self.apply(&plan)?;
        info!("Project {} configured", spec.name());
        Ok(())
    }

    /// Write a previously computed plan
    pub fn apply(&self, plan: &ProjectPlan) -> Result<()> {
        let layout = &plan.layout;
        let dir_attrs = FileAttrs::directory(self.ownership.clone());
        let file_attrs = FileAttrs::file(self.ownership.clone());

        self.dirs.ensure_dir(&layout.etc_dir, &dir_attrs, true)?;
        self.dirs.ensure_dir(&layout.var_dir, &dir_attrs, true)?;

        if let Some(scm_import) = &plan.scm_import {
            self.dirs.ensure_dir(&layout.scm_dir, &dir_attrs, false)?;
            self.renderer.render(
                &layout.scm_import_properties,
                &RenderRequest {
                    template: PROPERTIES_TEMPLATE,
                    namespace: &plan.cookbook,
                    attrs: &file_attrs,
                    properties: scm_import,
                },
            )?;
        }

        self.renderer.render(
            &layout.project_properties,
            &RenderRequest {
                template: PROPERTIES_TEMPLATE,
                namespace: &plan.cookbook,
                attrs: &file_attrs,
                properties: &plan.properties,
            },
        )
    }

    /// Remove the project directory and everything in it
    ///
    /// Succeeds whether or not the project exists.
    pub fn delete(&self, project: &ProjectRef) -> Result<()> {
        let layout = ProjectLayout::new(&self.paths, project.name());
        self.remover.remove_dir(&layout.root, true)?;
        info!("Project {} deleted", project.name());
        Ok(())
    }
}

impl std::fmt::Debug for ProjectConfigurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectConfigurator")
            .field("paths", &self.paths)
            .field("ownership", &self.ownership)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::parse_properties;
    use crate::value::{PropertyMap, PropertyValue};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ProjectConfigurator) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("Invalid UTF-8 path");
        let paths = HostPaths::new(root.join("data"), root.join("base"));
        (temp_dir, ProjectConfigurator::local(paths, None, None))
    }

    #[test]
    fn test_create_and_delete() {
        let (_temp, configurator) = setup();
        let source: PropertyMap = [("type", PropertyValue::from("url"))].into_iter().collect();
        let spec = ProjectSpec::builder("web").source(source).build().unwrap();

        configurator.create(&spec).unwrap();

        let layout = ProjectLayout::new(configurator.paths(), "web");
        assert!(layout.var_dir.is_dir());
        assert!(!layout.scm_dir.exists());
        let written = parse_properties(&fs::read_to_string(&layout.project_properties).unwrap());
        assert_eq!(written["project.name"], "web");
        assert_eq!(written["resources.source.1.type"], "url");

        configurator.delete(&spec.project_ref()).unwrap();
        assert!(!layout.root.exists());
        configurator.delete(&spec.project_ref()).unwrap();
    }
}
