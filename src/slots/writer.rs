// ABOUTME: Write side of the slot registry: create/update, promote, delete.
// ABOUTME: Implementations treat any non-success status as fatal for that operation.

use async_trait::async_trait;
use std::path::Path;

use crate::artifact::{PreparedArtifact, SourceType};
use crate::deploy::DeploymentSettings;
use crate::locator::ResourceLocator;
use crate::management::ApiError;
use crate::types::DeploymentName;

/// Pre-signed location handed out by the management service for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLocation {
    pub upload_url: String,
    pub relative_path: String,
}

/// Everything submitted when creating or updating a deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentDescriptor {
    pub relative_path: String,
    pub source_type: SourceType,
    pub settings: DeploymentSettings,
}

/// Mutating calls against the slot registry.
#[async_trait]
pub trait SlotWriter: Send + Sync {
    /// Ask for a write target for the next artifact upload.
    async fn request_upload_location(
        &self,
        locator: &ResourceLocator,
    ) -> Result<UploadLocation, ApiError>;

    /// Upload the artifact file to a location returned by `request_upload_location`.
    async fn upload_artifact(&self, location: &UploadLocation, path: &Path)
    -> Result<(), ApiError>;

    /// Submit the deployment resource.
    async fn put_deployment(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
        descriptor: &DeploymentDescriptor,
    ) -> Result<(), ApiError>;

    /// Point the app's production traffic at `name`.
    async fn set_active(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError>;

    async fn delete_deployment(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError>;

    /// Upload an artifact and create or update `name` to run it.
    ///
    /// Requests an upload location, uploads the artifact bytes there, then submits the
    /// deployment descriptor referencing the uploaded file's relative path.
    async fn create_or_update_deployment(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
        artifact: &PreparedArtifact,
        settings: &DeploymentSettings,
    ) -> Result<(), ApiError> {
        let location = self.request_upload_location(locator).await?;
        tracing::debug!(relative_path = %location.relative_path, "upload location granted");

        self.upload_artifact(&location, artifact.path()).await?;

        let descriptor = DeploymentDescriptor {
            relative_path: location.relative_path,
            source_type: artifact.source_type(),
            settings: settings.clone(),
        };
        self.put_deployment(locator, name, &descriptor).await
    }
}
