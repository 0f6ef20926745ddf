//! Error types for scaffolding operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Errors raised while normalizing names, rendering templates, or patching files
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The supplied name is empty or contains no usable characters
    #[error("invalid name '{0}': must contain at least one letter or digit")]
    InvalidName(String),

    /// Unknown project template kind
    #[error("invalid template kind '{kind}'. Available templates: {available}")]
    InvalidTemplateKind {
        /// The rejected kind
        kind: String,
        /// Comma-separated list of accepted kinds
        available: String,
    },

    /// Unknown component kind
    #[error("unknown component kind '{kind}'. Available kinds: {available}")]
    InvalidComponentKind {
        /// The rejected kind
        kind: String,
        /// Comma-separated list of accepted kinds
        available: String,
    },

    /// Destination directory already exists
    #[error("directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A template references a variable missing from the substitution context
    #[error("unresolved template variable '{variable}' in {template}")]
    UnresolvedVariable {
        /// Variable name as written in the template
        variable: String,
        /// Template path or name where the reference was found
        template: String,
    },

    /// Template tree or template file is unusable
    #[error("invalid template {}: {reason}", .path.display())]
    InvalidTemplate {
        /// Offending template path
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Underlying filesystem failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Original error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it occurred on
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attach a path to `std::io::Result` values
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| ScaffoldError::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = ScaffoldError::io(
            "/tmp/missing.py",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/missing.py"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_unresolved_variable_message() {
        let err = ScaffoldError::UnresolvedVariable {
            variable: "class_name".to_string(),
            template: "model.py".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved template variable 'class_name' in model.py"
        );
    }
}
