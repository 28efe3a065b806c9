//! Error types for the Xuetang content pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias for Xuetang operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, validating, or querying content.
///
/// A lookup that finds nothing is not an error; those operations return
/// `Option`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// File-system failure on a known path.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not well-formed YAML.
    #[error("YAML parse error: {message}")]
    Yaml {
        /// Message from the YAML parser.
        message: String,
    },

    /// The text parsed but violates the content schema.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// A parse or validation failure attributed to a content file.
    #[error("Invalid content in {}: {source}", .path.display())]
    Content {
        /// Offending file.
        path: PathBuf,
        /// The parse or validation failure.
        #[source]
        source: Box<Error>,
    },

    /// Two content files declare the same identifier.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Content kind ("course", "resource").
        kind: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// Invalid portal configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },
}

impl Error {
    /// Creates an I/O error bound to the path that failed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a YAML syntax error.
    pub fn yaml<S: Into<String>>(message: S) -> Self {
        Error::Yaml {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Attributes an error to the content file it came from.
    pub fn in_file(path: impl AsRef<Path>, source: Error) -> Self {
        Error::Content {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        }
    }

    /// Creates a duplicate identifier error.
    pub fn duplicate_id<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Error::DuplicateId { kind, id: id.into() }
    }

    /// Returns `true` for schema validation failures, including ones wrapped
    /// in a file context.
    pub fn is_validation(&self) -> bool {
        self.violations().is_some()
    }

    /// Returns `true` for YAML syntax failures, including ones wrapped in a
    /// file context.
    pub fn is_yaml(&self) -> bool {
        match self {
            Error::Yaml { .. } => true,
            Error::Content { source, .. } => source.is_yaml(),
            _ => false,
        }
    }

    /// The schema violations carried by this error, if any.
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            Error::Content { source, .. } => source.violations(),
            _ => None,
        }
    }

    /// The file this error is attributed to, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Io { path, .. } | Error::Content { path, .. } => Some(path),
            _ => None,
        }
    }
}
