// ABOUTME: Error types for request validation and action preconditions.
// ABOUTME: Precondition failures are raised before any mutating remote call.

/// A request that cannot be built from the supplied parameters.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("UnknownOrUnsupportedAction: {0}")]
    UnknownAction(String),

    #[error("deployment name is required when not targeting the staging deployment")]
    MissingDeploymentName,

    #[error("a package is required for the deploy action")]
    MissingPackage,

    #[error("unsupported runtime version: {0}")]
    UnknownRuntimeVersion(String),
}

/// The current slot registry does not allow the requested action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// No inactive slot exists and none may be created.
    #[error("NoStagingDeployment: no staging deployment exists")]
    NoStagingDeployment,

    /// The named slot does not exist and creation was not requested.
    #[error("DeploymentDoesNotExist: deployment {0} does not exist")]
    DeploymentDoesNotExist(String),

    /// Creating the named slot would exceed the two-slot limit.
    #[error("TwoDeploymentsAlreadyExist: cannot create {requested}, app already has {}", .existing.join(", "))]
    TwoDeploymentsAlreadyExist {
        requested: String,
        existing: Vec<String>,
    },

    /// Only the current staging slot may be promoted.
    #[error(
        "StagingDeploymentNameMismatch: {requested} is not the staging deployment ({})",
        .staging.as_deref().unwrap_or("none")
    )]
    StagingDeploymentNameMismatch {
        requested: String,
        staging: Option<String>,
    },
}
