// ABOUTME: Resource locator: which subscription, group, service, and app to act on.
// ABOUTME: The resource group is discovered from the service's ARM id, never user-supplied.

mod error;
mod resolve;

pub use error::LocatorError;
pub use resolve::{ServiceDirectory, ServiceInstance, parse_resource_group, resolve_locator};

use crate::types::{AppName, DeploymentName, ResourceGroupName, ServiceName, SubscriptionId};

/// ARM resource provider path for Spring Cloud service instances.
pub const PROVIDER_PATH: &str = "providers/Microsoft.AppPlatform/Spring";

/// What the caller asked for: everything except the resource group.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    pub subscription: SubscriptionId,
    pub service: ServiceName,
    pub app: AppName,
}

/// Fully resolved identity of the app being deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    subscription: SubscriptionId,
    resource_group: ResourceGroupName,
    service: ServiceName,
    app: AppName,
}

impl ResourceLocator {
    pub fn new(target: TargetSpec, resource_group: ResourceGroupName) -> Self {
        Self {
            subscription: target.subscription,
            resource_group,
            service: target.service,
            app: target.app,
        }
    }

    pub fn subscription(&self) -> &SubscriptionId {
        &self.subscription
    }

    pub fn resource_group(&self) -> &ResourceGroupName {
        &self.resource_group
    }

    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    pub fn app(&self) -> &AppName {
        &self.app
    }

    /// `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.AppPlatform/Spring/{svc}`
    pub fn service_path(&self) -> String {
        service_path(&self.subscription, &self.resource_group, &self.service)
    }

    pub fn app_path(&self) -> String {
        format!(
            "{}/apps/{}",
            self.service_path(),
            urlencoding::encode(self.app.as_str())
        )
    }

    pub fn deployments_path(&self) -> String {
        format!("{}/deployments", self.app_path())
    }

    pub fn deployment_path(&self, name: &DeploymentName) -> String {
        format!(
            "{}/{}",
            self.deployments_path(),
            urlencoding::encode(name.as_str())
        )
    }
}

impl std::fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "service {} app {}", self.service, self.app)
    }
}

pub(crate) fn service_path(
    subscription: &SubscriptionId,
    resource_group: &ResourceGroupName,
    service: &ServiceName,
) -> String {
    format!(
        "/subscriptions/{}/resourceGroups/{}/{}/{}",
        urlencoding::encode(subscription.as_str()),
        urlencoding::encode(resource_group.as_str()),
        PROVIDER_PATH,
        urlencoding::encode(service.as_str())
    )
}
