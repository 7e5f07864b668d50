// ABOUTME: Application-wide error types for asc-deploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::credential::CredentialError;
use crate::deploy::{PreconditionError, RequestError};
use crate::locator::LocatorError;
use crate::management::ApiError;
use crate::types::ResourceNameError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid environment-variables input: {0}")]
    InvalidEnvironmentVariables(String),

    #[error("invalid management endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    ResourceName(#[from] ResourceNameError),

    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
