//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the bundling pipeline.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no valid language in '{selector}' (expected 'all' or a list of: csharp, java, python, html)")]
    InvalidLanguage { selector: String },
    #[error("invalid sort mode '{value}' (expected 'name' or 'type')")]
    InvalidSort { value: String },
    #[error("no matching files found under {}", root.display())]
    NoMatchingFiles { root: PathBuf },
    #[error("failed to read {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write bundle to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BundleError {
    /// Whether the error comes from user input rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BundleError::InvalidLanguage { .. } | BundleError::InvalidSort { .. }
        )
    }
}
