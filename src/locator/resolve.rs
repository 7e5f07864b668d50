// ABOUTME: Discovers the resource group of a named service instance.
// ABOUTME: Lists services in the subscription, filters by exact name, parses the ARM id.

use async_trait::async_trait;

use super::{LocatorError, ResourceLocator, TargetSpec};
use crate::management::ApiError;
use crate::types::{ResourceGroupName, ServiceName};

/// A Spring Cloud service instance as listed by the management service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Fully-qualified ARM resource id.
    pub id: String,
    pub name: String,
}

/// Subscription-wide view of service instances.
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Every service instance in the subscription.
    async fn list_services(&self) -> Result<Vec<ServiceInstance>, ApiError>;

    /// Fetch one service instance by group and name.
    async fn get_service(
        &self,
        resource_group: &ResourceGroupName,
        service: &ServiceName,
    ) -> Result<ServiceInstance, ApiError>;
}

/// Resolve the resource group of `target.service` and build the locator.
///
/// # Errors
///
/// - `ResourceDoesNotExist` when no instance carries the name
/// - `DuplicateServiceName` when several do
/// - `ResourceGroupParse` when the instance id has no resource group segment
/// - `Remote` when listing or fetching the instance fails
pub async fn resolve_locator<D: ServiceDirectory + ?Sized>(
    directory: &D,
    target: TargetSpec,
) -> Result<ResourceLocator, LocatorError> {
    let services = directory.list_services().await?;

    let mut matches: Vec<ServiceInstance> = services
        .into_iter()
        .filter(|service| service.name == target.service.as_str())
        .collect();

    let instance = match matches.len() {
        0 => {
            return Err(LocatorError::ResourceDoesNotExist(
                target.service.to_string(),
            ));
        }
        1 => matches.remove(0),
        count => {
            return Err(LocatorError::DuplicateServiceName {
                name: target.service.to_string(),
                count,
            });
        }
    };

    let resource_group = parse_resource_group(&instance.id)?;
    tracing::info!(resource_group = %resource_group, "service resource group resolved");

    directory
        .get_service(&resource_group, &target.service)
        .await?;

    Ok(ResourceLocator::new(target, resource_group))
}

/// Extract the resource group from a Spring Cloud ARM id.
///
/// Expects `…/resourceGroups/{group}/providers/Microsoft.AppPlatform/Spring/…`, with
/// path keywords compared case-insensitively.
pub fn parse_resource_group(id: &str) -> Result<ResourceGroupName, LocatorError> {
    let malformed = || LocatorError::ResourceGroupParse(id.to_string());
    let segments: Vec<&str> = id.split('/').collect();

    let pos = segments
        .iter()
        .position(|s| s.eq_ignore_ascii_case("resourceGroups"))
        .ok_or_else(malformed)?;

    let group = segments
        .get(pos + 1)
        .filter(|s| !s.is_empty())
        .ok_or_else(malformed)?;

    let provider: Vec<&str> = super::PROVIDER_PATH.split('/').collect();
    let rest = &segments[pos + 2..];
    let provider_follows = rest.len() > provider.len()
        && rest
            .iter()
            .zip(&provider)
            .all(|(seg, expected)| seg.eq_ignore_ascii_case(expected));

    if !provider_follows {
        return Err(malformed());
    }

    ResourceGroupName::new(group).map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "/subscriptions/sub-1/resourceGroups/rg-apps/providers/Microsoft.AppPlatform/Spring/orders";

    #[test]
    fn parses_group_from_service_id() {
        assert_eq!(parse_resource_group(ID).unwrap().as_str(), "rg-apps");
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let id = "/subscriptions/s/RESOURCEGROUPS/Rg1/Providers/microsoft.appplatform/spring/x";
        assert_eq!(parse_resource_group(id).unwrap().as_str(), "Rg1");
    }

    #[test]
    fn rejects_ids_without_group() {
        let err = parse_resource_group("/subscriptions/s/providers/Microsoft.AppPlatform/Spring/x")
            .unwrap_err();
        assert!(matches!(err, LocatorError::ResourceGroupParse(_)));
    }

    #[test]
    fn rejects_ids_from_another_provider() {
        let id = "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/x";
        assert!(parse_resource_group(id).is_err());
    }

    #[test]
    fn keeps_punctuation_in_group_names() {
        let id = "/subscriptions/s/resourceGroups/rg.apps_(west)/providers/Microsoft.AppPlatform/Spring/x";
        assert_eq!(parse_resource_group(id).unwrap().as_str(), "rg.apps_(west)");
    }

    #[test]
    fn rejects_group_that_is_not_a_valid_name() {
        let id = "/subscriptions/s/resourceGroups/rg./providers/Microsoft.AppPlatform/Spring/x";
        assert!(matches!(
            parse_resource_group(id),
            Err(LocatorError::ResourceGroupParse(_))
        ));
    }

    #[test]
    fn rejects_empty_group_segment() {
        let id = "/subscriptions/s/resourceGroups//providers/Microsoft.AppPlatform/Spring/x";
        assert!(parse_resource_group(id).is_err());
    }
}
