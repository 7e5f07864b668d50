// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory slot registry that records every call it receives.

use asc_deploy::locator::{ResourceLocator, ServiceDirectory, ServiceInstance, TargetSpec};
use asc_deploy::management::{ApiError, Operation};
use asc_deploy::slots::{DeploymentDescriptor, Slot, SlotReader, SlotWriter, UploadLocation};
use asc_deploy::types::{
    AppName, DeploymentName, ResourceGroupName, ServiceName, SubscriptionId,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub const SERVICE: &str = "orders-svc";
pub const RESOURCE_GROUP: &str = "rg-apps";
pub const APP: &str = "api";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("asc_deploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn target() -> TargetSpec {
    TargetSpec {
        subscription: SubscriptionId::new("sub-1").unwrap(),
        service: ServiceName::new(SERVICE).unwrap(),
        app: AppName::new(APP).unwrap(),
    }
}

#[allow(dead_code)]
pub fn service_id(group: &str, name: &str) -> String {
    format!("/subscriptions/sub-1/resourceGroups/{group}/providers/Microsoft.AppPlatform/Spring/{name}")
}

/// A call observed by [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListServices,
    GetService { resource_group: String, service: String },
    ListSlots,
    RequestUploadLocation,
    Upload { path: PathBuf, existed: bool, bytes: u64 },
    PutDeployment { name: String, descriptor: DeploymentDescriptor },
    SetActive(String),
    Delete(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Upload { .. } | Call::PutDeployment { .. } | Call::SetActive(_) | Call::Delete(_)
        )
    }
}

/// Slot registry and service directory held in memory.
pub struct FakeRegistry {
    services: Vec<ServiceInstance>,
    slots: Mutex<Vec<Slot>>,
    calls: Mutex<Vec<Call>>,
    failing: Option<Operation>,
}

#[allow(dead_code)]
impl FakeRegistry {
    /// One service named [`SERVICE`] in [`RESOURCE_GROUP`] holding `slots`.
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            services: vec![ServiceInstance {
                id: service_id(RESOURCE_GROUP, SERVICE),
                name: SERVICE.to_string(),
            }],
            slots: Mutex::new(slots),
            calls: Mutex::new(Vec::new()),
            failing: None,
        }
    }

    pub fn blue_green() -> Self {
        Self::new(vec![Slot::new("staging", false), Slot::new("production", true)])
    }

    pub fn with_services(mut self, services: Vec<ServiceInstance>) -> Self {
        self.services = services;
        self
    }

    /// Make every call for `operation` fail with HTTP 500.
    pub fn failing(mut self, operation: Operation) -> Self {
        self.failing = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.slots.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check(&self, operation: Operation) -> Result<(), ApiError> {
        if self.failing == Some(operation) {
            return Err(ApiError::Status {
                operation,
                status: 500,
                message: "InternalServerError: injected".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceDirectory for FakeRegistry {
    async fn list_services(&self) -> Result<Vec<ServiceInstance>, ApiError> {
        self.record(Call::ListServices);
        self.check(Operation::ListServices)?;
        Ok(self.services.clone())
    }

    async fn get_service(
        &self,
        resource_group: &ResourceGroupName,
        service: &ServiceName,
    ) -> Result<ServiceInstance, ApiError> {
        self.record(Call::GetService {
            resource_group: resource_group.to_string(),
            service: service.to_string(),
        });
        self.check(Operation::GetService)?;
        self.services
            .iter()
            .find(|s| s.name == service.as_str())
            .cloned()
            .ok_or(ApiError::Status {
                operation: Operation::GetService,
                status: 404,
                message: "ResourceNotFound".to_string(),
            })
    }
}

#[async_trait]
impl SlotReader for FakeRegistry {
    async fn list_slots(&self, _locator: &ResourceLocator) -> Result<Vec<Slot>, ApiError> {
        self.record(Call::ListSlots);
        self.check(Operation::ListDeployments)?;
        Ok(self.slots())
    }
}

#[async_trait]
impl SlotWriter for FakeRegistry {
    async fn request_upload_location(
        &self,
        _locator: &ResourceLocator,
    ) -> Result<UploadLocation, ApiError> {
        self.record(Call::RequestUploadLocation);
        self.check(Operation::RequestUploadUrl)?;
        Ok(UploadLocation {
            upload_url: "https://files.example.test/share/abc?sig=x".to_string(),
            relative_path: "resources/abc".to_string(),
        })
    }

    async fn upload_artifact(&self, _location: &UploadLocation, path: &Path) -> Result<(), ApiError> {
        let bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        self.record(Call::Upload {
            path: path.to_path_buf(),
            existed: path.exists(),
            bytes,
        });
        self.check(Operation::UploadArtifact)
    }

    async fn put_deployment(
        &self,
        _locator: &ResourceLocator,
        name: &DeploymentName,
        descriptor: &DeploymentDescriptor,
    ) -> Result<(), ApiError> {
        self.record(Call::PutDeployment {
            name: name.to_string(),
            descriptor: descriptor.clone(),
        });
        self.check(Operation::Deploy)?;

        let mut slots = self.slots.lock();
        if !slots.iter().any(|s| s.name == name.as_str()) {
            let first = slots.is_empty();
            slots.push(Slot::new(name.as_str(), first));
        }
        Ok(())
    }

    async fn set_active(
        &self,
        _locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError> {
        self.record(Call::SetActive(name.to_string()));
        self.check(Operation::SetActiveDeployment)?;
        for slot in self.slots.lock().iter_mut() {
            slot.active = slot.name == name.as_str();
        }
        Ok(())
    }

    async fn delete_deployment(
        &self,
        _locator: &ResourceLocator,
        name: &DeploymentName,
    ) -> Result<(), ApiError> {
        self.record(Call::Delete(name.to_string()));
        self.check(Operation::DeleteDeployment)?;
        self.slots.lock().retain(|s| s.name != name.as_str());
        Ok(())
    }
}
