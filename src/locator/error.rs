// ABOUTME: Errors raised while resolving the target service instance.
// ABOUTME: All are fatal and occur before any deployment mutation.

use crate::management::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// No service instance with that name is visible to the credential.
    #[error("ResourceDoesNotExist: no service instance named {0}")]
    ResourceDoesNotExist(String),

    /// More than one service instance shares the name.
    #[error("DuplicateServiceName: {count} service instances named {name}")]
    DuplicateServiceName { name: String, count: usize },

    /// The service id does not contain an extractable resource group.
    #[error("ResourceGroupParseError: cannot find resource group in id {0}")]
    ResourceGroupParse(String),

    #[error(transparent)]
    Remote(#[from] ApiError),
}
