//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading a bundle or emitting one of its fragments.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The input bundle does not exist.
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    /// The input bundle exists but could not be read as UTF-8 text.
    #[error("failed to read input file '{}': {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fragment's parent directory could not be created.
    #[error("failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fragment could not be written to its target.
    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The marker path leaves the output root and the reject policy is active.
    #[error("path '{0}' escapes the output root")]
    UnsafePath(String),
}
