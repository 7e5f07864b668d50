// ABOUTME: Error types for artifact classification and packaging.
// ABOUTME: Raised before any upload is attempted.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("UnsupportedSourceType: {}", .0.display())]
    UnsupportedSourceType(PathBuf),

    #[error("failed to create scratch directory: {source}")]
    Scratch { source: std::io::Error },

    #[error("failed to compress {}: {source}", .path.display())]
    Compression {
        path: PathBuf,
        source: std::io::Error,
    },
}
