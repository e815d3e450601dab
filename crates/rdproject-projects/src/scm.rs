//! SCM import settings
//!
//! Job definitions are imported from a git repository cloned into the
//! project's `scm` directory. User overrides are given without the
//! `scm.import.` prefix and replace the default at the same key.

use crate::value::{PropertyMap, PropertyValue};
use camino::Utf8Path;

/// Prefix of every SCM import property
pub const SCM_IMPORT_PREFIX: &str = "scm.import.";

/// Default SCM import settings for a project whose checkout lives in `scm_dir`
pub fn scm_import_defaults(scm_dir: &Utf8Path) -> PropertyMap {
    let defaults: [(&str, PropertyValue); 12] = [
        ("type", "git-import".into()),
        ("username", "rundeck".into()),
        ("config.branch", "master".into()),
        ("config.strictHostKeyChecking", "yes".into()),
        (
            "config.pathTemplate",
            "${job.group}${job.name}-${job.id}.${config.format}".into(),
        ),
        ("config.dir", scm_dir.as_str().into()),
        ("config.format", "yaml".into()),
        ("config.useFilePattern", true.into()),
        ("config.importUuidBehavior", "preserve".into()),
        ("config.filePattern", r".*\.yaml".into()),
        ("config.fetchAutomatically", true.into()),
        ("config.enabled", true.into()),
    ];

    defaults
        .into_iter()
        .map(|(key, value)| (format!("{}{}", SCM_IMPORT_PREFIX, key), value))
        .collect()
}

/// Defaults overlaid with the user's overrides
pub fn scm_import_properties(scm_dir: &Utf8Path, overrides: &PropertyMap) -> PropertyMap {
    let mut properties = scm_import_defaults(scm_dir);
    properties.merge_prefixed(SCM_IMPORT_PREFIX, overrides);
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCM_DIR: &str = "/var/lib/rundeck/projects/web/scm";

    #[test]
    fn test_defaults() {
        let defaults = scm_import_defaults(Utf8Path::new(SCM_DIR));

        assert_eq!(defaults.len(), 12);
        assert!(defaults.iter().all(|(k, _)| k.starts_with(SCM_IMPORT_PREFIX)));
        assert_eq!(
            defaults.get("scm.import.type"),
            Some(&PropertyValue::from("git-import"))
        );
        assert_eq!(
            defaults.get("scm.import.config.dir"),
            Some(&PropertyValue::from(SCM_DIR))
        );
        assert_eq!(
            defaults.get("scm.import.config.useFilePattern"),
            Some(&PropertyValue::Bool(true))
        );
        assert_eq!(
            defaults.get("scm.import.config.filePattern").unwrap().to_string(),
            r".*\.yaml"
        );
    }

    #[test]
    fn test_overrides_keep_other_defaults() {
        let overrides: PropertyMap = [
            ("roles.0", PropertyValue::from("myrole")),
            ("config.strictHostKeyChecking", PropertyValue::from("no")),
        ]
        .into_iter()
        .collect();

        let properties = scm_import_properties(Utf8Path::new(SCM_DIR), &overrides);

        assert_eq!(properties.len(), 13);
        assert_eq!(
            properties.get("scm.import.roles.0"),
            Some(&PropertyValue::from("myrole"))
        );
        assert_eq!(
            properties.get("scm.import.config.strictHostKeyChecking"),
            Some(&PropertyValue::from("no"))
        );
        assert_eq!(
            properties.get("scm.import.type"),
            Some(&PropertyValue::from("git-import"))
        );
    }
}
