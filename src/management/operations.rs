// ABOUTME: Registry and directory trait implementations for ManagementClient.
// ABOUTME: Each method issues one ARM call and tags failures with its Operation.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_LENGTH;
use std::path::Path;

use super::client::{ManagementClient, read_json};
use super::error::{ApiError, Operation};
use super::models::{
    ActiveDeploymentBody, DeploymentBody, DeploymentResource, ResourceUploadDefinition,
    ServiceResource,
};
use crate::locator::{self, PROVIDER_PATH, ResourceLocator, ServiceDirectory, ServiceInstance};
use crate::slots::{DeploymentDescriptor, Slot, SlotReader, SlotWriter, UploadLocation};
use crate::types::{DeploymentName, ResourceGroupName, ServiceName};

#[async_trait]
impl ServiceDirectory for ManagementClient {
    async fn list_services(&self) -> Result<Vec<ServiceInstance>, ApiError> {
        let operation = Operation::ListServices;
        let path = format!(
            "/subscriptions/{}/{}",
            urlencoding::encode(self.subscription.as_str()),
            PROVIDER_PATH
        );
        let url = self.url(operation, &path)?;
        let services: Vec<ServiceResource> = self.list_all(operation, url).await?;
        tracing::debug!(count = services.len(), "listed service instances");
        Ok(services.into_iter().map(ServiceInstance::from).collect())
    }

    async fn get_service(
        &self,
        resource_group: &ResourceGroupName,
        service: &ServiceName,
    ) -> Result<ServiceInstance, ApiError> {
        let operation = Operation::GetService;
        let path = locator::service_path(&self.subscription, resource_group, service);
        let url = self.url(operation, &path)?;
        let response = self
            .execute(operation, self.request(Method::GET, url))
            .await?;
        let resource: ServiceResource = read_json(operation, response).await?;
        Ok(resource.into())
    }
}

#[async_trait]
impl SlotReader for ManagementClient {
    async fn list_slots(&self, locator: &ResourceLocator) -> Result<Vec<Slot>, ApiError> {
        let operation = Operation::ListDeployments;
        let url = self.url(operation, &locator.deployments_path())?;
        let deployments: Vec<DeploymentResource> = self.list_all(operation, url).await?;
        Ok(deployments.into_iter().map(Slot::from).collect())
    }
}

#[async_trait]
impl SlotWriter for ManagementClient {
    async fn request_upload_location(
        &self,
        locator: &ResourceLocator,
    ) -> Result<UploadLocation, ApiError> {
        let operation = Operation::RequestUploadUrl;
        let path = format!("{}/getResourceUploadUrl", locator.app_path());
        let url = self.url(operation, &path)?;
        let response = self
            .execute(
                operation,
                self.request(Method::POST, url).header(CONTENT_LENGTH, 0),
            )
            .await?;
        let definition: ResourceUploadDefinition = read_json(operation, response).await?;
        Ok(definition.into())
    }

    async fn upload_artifact(
        &self,
        location: &UploadLocation,
        path: &Path,
    ) -> Result<(), ApiError> {
        self.upload_file(&location.upload_url, path).await
    }

    async fn put_deployment(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
        descriptor: &DeploymentDescriptor,
    ) -> Result<(), ApiError> {
        let operation = Operation::Deploy;
        let url = self.url(operation, &locator.deployment_path(name))?;
        let body = DeploymentBody::from(descriptor);
        tracing::debug!(deployment = %name, ?body, "submitting deployment");

        let response = self
            .execute(operation, self.request(Method::PUT, url).json(&body))
            .await?;
        self.wait_for(operation, response).await
    }

    async fn set_active(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError> {
        let operation = Operation::SetActiveDeployment;
        let url = self.url(operation, &locator.app_path())?;
        let body = ActiveDeploymentBody::new(name.as_str());
        tracing::debug!(?body, "switching active deployment");

        let response = self
            .execute(operation, self.request(Method::PATCH, url).json(&body))
            .await?;
        self.wait_for(operation, response).await
    }

    async fn delete_deployment(
        &self,
        locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError> {
        let operation = Operation::DeleteDeployment;
        let url = self.url(operation, &locator.deployment_path(name))?;
        let response = self
            .execute(operation, self.request(Method::DELETE, url))
            .await?;
        self.wait_for(operation, response).await
    }
}
