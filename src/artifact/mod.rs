// ABOUTME: Artifact resolution: classify a package path and make it uploadable.
// ABOUTME: Directories are packed into a gzipped tarball; jars and zips go up as-is.

mod compress;
mod error;

pub use compress::compress_directory;
pub use error::ArtifactError;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// How the management service should interpret an uploaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceType {
    /// A runnable Java archive.
    Jar,
    /// Source code, built remotely.
    Source,
    /// A zipped .NET Core application.
    NetCoreZip,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Jar => "Jar",
            SourceType::Source => "Source",
            SourceType::NetCoreZip => "NetCoreZip",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the source type of a package reference.
pub fn classify(package: &Path) -> Result<SourceType, ArtifactError> {
    if !package.exists() {
        return Err(ArtifactError::PackageNotFound(package.to_path_buf()));
    }

    if package.is_dir() {
        return Ok(SourceType::Source);
    }

    let extension = package
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case("jar") {
        Ok(SourceType::Jar)
    } else if extension.eq_ignore_ascii_case("zip") {
        Ok(SourceType::NetCoreZip)
    } else {
        Err(ArtifactError::UnsupportedSourceType(package.to_path_buf()))
    }
}

/// A file ready for upload, plus the scratch directory backing it (if any).
#[derive(Debug)]
pub struct PreparedArtifact {
    path: PathBuf,
    source_type: SourceType,
    scratch: Option<TempDir>,
}

impl PreparedArtifact {
    /// Wrap an existing file that needs no preparation.
    pub fn from_file(path: impl Into<PathBuf>, source_type: SourceType) -> Self {
        Self {
            path: path.into(),
            source_type,
            scratch: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Whether the upload file was generated from a directory.
    pub fn is_generated(&self) -> bool {
        self.scratch.is_some()
    }

    /// Remove the generated archive, reporting failures instead of swallowing them.
    pub fn cleanup(self) -> std::io::Result<()> {
        match self.scratch {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }
}

/// Classify `package` and compress it if it is a directory.
pub async fn prepare(package: &Path) -> Result<PreparedArtifact, ArtifactError> {
    let source_type = classify(package)?;

    if source_type != SourceType::Source {
        return Ok(PreparedArtifact::from_file(package, source_type));
    }

    let scratch = tempfile::Builder::new()
        .prefix("asc-deploy-")
        .tempdir()
        .map_err(|source| ArtifactError::Scratch { source })?;

    let archive = compress_directory(package, scratch.path())
        .await
        .map_err(|source| ArtifactError::Compression {
            path: package.to_path_buf(),
            source,
        })?;

    Ok(PreparedArtifact {
        path: archive,
        source_type,
        scratch: Some(scratch),
    })
}
