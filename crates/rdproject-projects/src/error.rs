//! Error types for rdproject-projects

use camino::Utf8PathBuf;
use thiserror::Error;

/// Result type alias using rdproject-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure classes of the project operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any side effect
    Validation,
    /// Recognized but unimplemented, or unknown, feature
    UnsupportedFeature,
    /// Filesystem, rendering or ownership failure
    Io,
}

/// Project configuration error types
#[derive(Error, Debug)]
pub enum Error {
    /// A field of the project specification is malformed
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Executor template not implemented or not known
    #[error("{message}")]
    UnsupportedFeature { message: String },

    /// Filesystem operation failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template missing from both the templates directory and the embedded set
    #[error("Template not found: {namespace}/{template}")]
    TemplateNotFound { namespace: String, template: String },

    /// Template error from Tera
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Owner does not exist on this host
    #[error("Unknown user: {user}")]
    UnknownUser { user: String },

    /// Group does not exist on this host
    #[error("Unknown group: {group}")]
    UnknownGroup { group: String },

    /// Manifest is not well-formed YAML or has the wrong shape
    #[error("Manifest parsing error: {0}")]
    ManifestParse(#[from] serde_yaml_ng::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] rdproject_core::Error),
}

impl Error {
    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported feature error
    pub fn unsupported_feature(message: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            message: message.into(),
        }
    }

    /// Create an IO error for a path
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a template not found error
    pub fn template_not_found(namespace: impl Into<String>, template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            namespace: namespace.into(),
            template: template.into(),
        }
    }

    /// Create an unknown user error
    pub fn unknown_user(user: impl Into<String>) -> Self {
        Self::UnknownUser { user: user.into() }
    }

    /// Create an unknown group error
    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroup {
            group: group.into(),
        }
    }

    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::ManifestParse(_) => ErrorKind::Validation,
            Self::UnsupportedFeature { .. } => ErrorKind::UnsupportedFeature,
            Self::Io { .. }
            | Self::TemplateNotFound { .. }
            | Self::Template(_)
            | Self::UnknownUser { .. }
            | Self::UnknownGroup { .. }
            | Self::Core(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::validation("name", "bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::unsupported_feature("WinRM template not yet supported").kind(),
            ErrorKind::UnsupportedFeature
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(Error::io("/tmp/x", io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display() {
        let err = Error::validation("sources[0]", "must contain a 'type' key");
        assert_eq!(
            err.to_string(),
            "Invalid sources[0]: must contain a 'type' key"
        );
    }
}
