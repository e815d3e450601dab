//! Field validators for project specifications
//!
//! Each validator checks one field and fails on the first violation.

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::value::{PropertyMap, PropertyValue};
use regex::Regex;
use std::sync::LazyLock;

/// Characters allowed in a project name
pub const NAME_PATTERN: &str = r"^[-_+.a-zA-Z0-9]+$";

/// Key every node source must carry
pub const SOURCE_TYPE_KEY: &str = "type";

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("project name pattern is valid"));

/// Project names are used as a path segment under `<datadir>/projects`
pub fn validate_name(name: &str) -> Result<()> {
    if !NAME_REGEX.is_match(name) {
        return Err(Error::validation(
            "name",
            format!("'{}' does not match {}", name, NAME_PATTERN),
        ));
    }

    if name == "." || name == ".." {
        return Err(Error::validation(
            "name",
            format!("'{}' is not a valid directory name", name),
        ));
    }

    Ok(())
}

/// Explicit executors need a provider and a non-empty config
pub fn validate_executor(executor: &Executor) -> Result<()> {
    let Executor::Explicit(config) = executor else {
        return Ok(());
    };

    if config.provider.trim().is_empty() {
        return Err(Error::validation("executor", "must contain a provider"));
    }

    if config.config.is_empty() {
        return Err(Error::validation(
            "executor",
            "must contain a non-empty config mapping",
        ));
    }

    Ok(())
}

/// Every source needs a truthy `type` entry
pub fn validate_sources(sources: &[PropertyMap]) -> Result<()> {
    for (i, source) in sources.iter().enumerate() {
        match source.get(SOURCE_TYPE_KEY) {
            None | Some(PropertyValue::Bool(false)) => {
                return Err(Error::validation(
                    format!("sources[{}]", i),
                    format!("must contain a '{}' key", SOURCE_TYPE_KEY),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

pub fn validate_cookbook(cookbook: &str) -> Result<()> {
    if cookbook.trim().is_empty() {
        return Err(Error::validation("cookbook", "must not be empty"));
    }

    if cookbook.contains('/') || cookbook == "." || cookbook == ".." {
        return Err(Error::validation(
            "cookbook",
            format!("'{}' is not a valid template namespace", cookbook),
        ));
    }

    Ok(())
}
