//! Error types for manifest loading, resolution, and gathering.

use std::path::PathBuf;

/// Errors that can occur when loading or resolving a `Manifest.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// An I/O error occurred while reading a manifest file.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse manifest: {0}")]
    Parse(String),

    /// A required field is missing from the manifest.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A declared local dependency path does not exist.
    #[error("dependency path does not exist: {}", .0.display())]
    MissingDependency(PathBuf),

    /// A file listed in `files` does not exist.
    #[error("source file does not exist: {}", .0.display())]
    MissingSourceFile(PathBuf),

    /// The local dependency graph contains a cycle.
    #[error("dependency cycle between modules: {0}")]
    DependencyCycle(String),

    /// A manifest value failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}
