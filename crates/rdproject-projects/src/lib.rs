//! # rdproject-projects
//!
//! Project configuration library for rdproject providing:
//! - Validated project specifications (name, executor, node sources, SCM import, properties)
//! - Executor template resolution
//! - Flattening of the specification into dotted-key property maps
//! - Directory layout and property file rendering under `<datadir>/projects/<name>`
//!
//! # Examples
//!
//! ## Create a project using the SSH executor template
//!
//! ```no_run
//! use rdproject_core::{HostPaths, Ownership};
//! use rdproject_projects::{ProjectConfigurator, ProjectSpec, PropertyMap};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = HostPaths::new("/var/lib/rundeck", "/var/lib/rundeck");
//! let configurator = ProjectConfigurator::local(paths, Some(Ownership::service()), None);
//!
//! let source: PropertyMap = [
//!     ("type", "url".into()),
//!     ("config.url", "http://chef-bridge/linux".into()),
//!     ("config.timeout", 30.into()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let spec = ProjectSpec::builder("linux_servers").source(source).build()?;
//! configurator.create(&spec)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Delete a project
//!
//! ```no_run
//! use rdproject_core::HostPaths;
//! use rdproject_projects::{ProjectConfigurator, ProjectRef};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = HostPaths::new("/var/lib/rundeck", "/var/lib/rundeck");
//! let configurator = ProjectConfigurator::local(paths, None, None);
//! configurator.delete(&ProjectRef::new("linux_servers")?)?;
//! # Ok(())
//! # }
//! ```

pub mod configurator;
pub mod error;
pub mod executor;
pub mod fs;
pub mod manifest;
pub mod plan;
pub mod render;
pub mod scm;
pub mod spec;
pub mod validation;
pub mod value;

pub use configurator::ProjectConfigurator;
pub use error::{Error, ErrorKind, Result};
pub use executor::{Executor, ExecutorTemplate, ProviderConfig};
pub use fs::{DirectoryEnsurer, DirectoryRemover, FileAttrs, LocalFilesystem};
pub use manifest::ProjectManifest;
pub use plan::{ProjectLayout, ProjectPlan};
pub use render::{parse_properties, RenderRequest, TemplateRenderer, TeraRenderer};
pub use spec::{ProjectRef, ProjectSpec, ProjectSpecBuilder};
pub use value::{PropertyMap, PropertyValue};
