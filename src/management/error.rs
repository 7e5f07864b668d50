// ABOUTME: Remote-call error types with SNAFU pattern.
// ABOUTME: Every error names the management operation that failed.

use snafu::Snafu;
use std::fmt;
use std::path::PathBuf;

use crate::credential::CredentialError;

/// A remote operation issued by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListServices,
    GetService,
    ListDeployments,
    RequestUploadUrl,
    UploadArtifact,
    Deploy,
    SetActiveDeployment,
    DeleteDeployment,
}

impl Operation {
    /// Stable identifier used as the prefix of error messages.
    pub fn error_name(&self) -> &'static str {
        match self {
            Operation::ListServices => "ListServicesError",
            Operation::GetService => "GetServiceError",
            Operation::ListDeployments => "ListDeploymentsError",
            Operation::RequestUploadUrl => "RequestUploadUrlError",
            Operation::UploadArtifact => "UploadArtifactError",
            Operation::Deploy => "DeployError",
            Operation::SetActiveDeployment => "SetActiveDeploymentError",
            Operation::DeleteDeployment => "DeleteDeploymentError",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_name())
    }
}

/// A remote call that did not succeed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("{operation}: HTTP {status}: {message}"))]
    Status {
        operation: Operation,
        status: u16,
        message: String,
    },

    #[snafu(display("{operation}: request failed: {source}"))]
    Transport {
        operation: Operation,
        source: reqwest::Error,
    },

    #[snafu(display("{operation}: invalid response body: {source}"))]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },

    #[snafu(display("{operation}: operation ended with status {status}"))]
    Unsuccessful { operation: Operation, status: String },

    #[snafu(display("{operation}: invalid URL {url}: {source}"))]
    InvalidUrl {
        operation: Operation,
        url: String,
        source: url::ParseError,
    },

    #[snafu(display("{operation}: cannot read artifact {}: {source}", path.display()))]
    ReadArtifact {
        operation: Operation,
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("{operation}: cannot acquire access token: {source}"))]
    Credential {
        operation: Operation,
        source: CredentialError,
    },
}

impl ApiError {
    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Status { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Unsuccessful { operation, .. }
            | ApiError::InvalidUrl { operation, .. }
            | ApiError::ReadArtifact { operation, .. }
            | ApiError::Credential { operation, .. } => *operation,
        }
    }

    /// HTTP status of the failed response, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
