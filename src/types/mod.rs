// ABOUTME: Validated Azure resource names used as ARM path segments.
// ABOUTME: Phantom kinds keep subscriptions, groups, services, apps, and deployments apart.

mod resource_name;

pub use resource_name::{
    AppName, DeploymentName, NameKind, ResourceGroupName, ResourceName, ResourceNameError,
    ServiceName, SubscriptionId,
};
