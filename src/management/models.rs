// ABOUTME: Wire models for the Microsoft.AppPlatform management API.
// ABOUTME: Only the fields this tool reads or writes are modeled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::artifact::SourceType;
use crate::deploy::RuntimeVersion;
use crate::locator::ServiceInstance;
use crate::slots::{DeploymentDescriptor, Slot, UploadLocation};

/// One page of a list response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default, rename = "nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceResource {
    pub id: String,
    pub name: String,
}

impl From<ServiceResource> for ServiceInstance {
    fn from(resource: ServiceResource) -> Self {
        ServiceInstance {
            id: resource.id,
            name: resource.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeploymentResource {
    pub name: String,
    #[serde(default)]
    pub properties: DeploymentProperties,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeploymentProperties {
    #[serde(default)]
    pub active: Option<bool>,
}

impl From<DeploymentResource> for Slot {
    /// Only an explicit `active: false` marks a staging slot.
    fn from(resource: DeploymentResource) -> Self {
        Slot::new(resource.name, resource.properties.active != Some(false))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceUploadDefinition {
    pub relative_path: String,
    pub upload_url: String,
}

impl From<ResourceUploadDefinition> for UploadLocation {
    fn from(definition: ResourceUploadDefinition) -> Self {
        UploadLocation {
            upload_url: definition.upload_url,
            relative_path: definition.relative_path,
        }
    }
}

/// Body of a deployment create-or-update.
#[derive(Debug, Serialize)]
pub(crate) struct DeploymentBody<'a> {
    properties: DeploymentBodyProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentBodyProperties<'a> {
    source: UserSourceInfo<'a>,
    deployment_settings: DeploymentSettingsBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSourceInfo<'a> {
    #[serde(rename = "type")]
    source_type: SourceType,
    relative_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentSettingsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    jvm_options: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    net_core_main_entry_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    runtime_version: Option<RuntimeVersion>,
    environment_variables: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a DeploymentDescriptor> for DeploymentBody<'a> {
    fn from(descriptor: &'a DeploymentDescriptor) -> Self {
        let settings = &descriptor.settings;
        DeploymentBody {
            properties: DeploymentBodyProperties {
                source: UserSourceInfo {
                    source_type: descriptor.source_type,
                    relative_path: &descriptor.relative_path,
                    version: settings.version.as_deref(),
                },
                deployment_settings: DeploymentSettingsBody {
                    jvm_options: settings.jvm_options.as_deref(),
                    net_core_main_entry_path: settings.net_core_main_entry_path.as_deref(),
                    runtime_version: settings.runtime_version,
                    environment_variables: &settings.environment_variables,
                },
            },
        }
    }
}

/// Body of an app update that switches production traffic.
#[derive(Debug, Serialize)]
pub(crate) struct ActiveDeploymentBody<'a> {
    properties: ActiveDeploymentProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveDeploymentProperties<'a> {
    active_deployment_name: &'a str,
}

impl<'a> ActiveDeploymentBody<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            properties: ActiveDeploymentProperties {
                active_deployment_name: name,
            },
        }
    }
}

/// Status document behind an `Azure-AsyncOperation` header.
#[derive(Debug, Deserialize)]
pub(crate) struct AsyncOperationStatus {
    pub status: String,
}

/// ARM error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Readable summary of an error response body.
pub(crate) fn error_message(body: &str) -> String {
    const MAX_RAW: usize = 512;

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let ErrorDetail { code, message } = envelope.error;
        match (code, message) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (Some(text), None) | (None, Some(text)) => return text,
            (None, None) => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        return "empty response body".to_string();
    }
    body.chars().take(MAX_RAW).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeploymentSettings;
    use serde_json::json;

    #[test]
    fn missing_active_flag_is_not_staging() {
        let resource: DeploymentResource =
            serde_json::from_value(json!({"name": "default", "properties": {}})).unwrap();
        assert!(Slot::from(resource).active);

        let resource: DeploymentResource =
            serde_json::from_value(json!({"name": "green", "properties": {"active": false}}))
                .unwrap();
        assert!(!Slot::from(resource).active);
    }

    #[test]
    fn deployment_body_matches_wire_shape() {
        let mut settings = DeploymentSettings {
            runtime_version: Some(RuntimeVersion::Java11),
            jvm_options: Some("-Xmx1g".to_string()),
            version: Some("1.2.0".to_string()),
            ..Default::default()
        };
        settings
            .environment_variables
            .insert("PROFILE".to_string(), "prod".to_string());

        let descriptor = DeploymentDescriptor {
            relative_path: "resources/abc".to_string(),
            source_type: SourceType::Jar,
            settings,
        };

        let body = serde_json::to_value(DeploymentBody::from(&descriptor)).unwrap();
        assert_eq!(
            body,
            json!({
                "properties": {
                    "source": {
                        "type": "Jar",
                        "relativePath": "resources/abc",
                        "version": "1.2.0"
                    },
                    "deploymentSettings": {
                        "jvmOptions": "-Xmx1g",
                        "runtimeVersion": "Java_11",
                        "environmentVariables": {"PROFILE": "prod"}
                    }
                }
            })
        );
    }

    #[test]
    fn active_deployment_body() {
        let body = serde_json::to_value(ActiveDeploymentBody::new("green")).unwrap();
        assert_eq!(
            body,
            json!({"properties": {"activeDeploymentName": "green"}})
        );
    }

    #[test]
    fn error_message_prefers_arm_envelope() {
        let body = r#"{"error":{"code":"NotFound","message":"App not found"}}"#;
        assert_eq!(error_message(body), "NotFound: App not found");
        assert_eq!(error_message("  "), "empty response body");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }
}
