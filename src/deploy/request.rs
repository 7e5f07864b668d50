// ABOUTME: The resolved intent of one invocation and its deployment settings.
// ABOUTME: Built once from parameters and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use super::{Action, RequestError};
use crate::types::DeploymentName;

/// Name given to the staging slot when one has to be created.
pub const DEFAULT_STAGING_NAME: &str = "staging";

/// Which slot the action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSelector {
    /// Whatever slot is currently inactive, resolved at run time.
    Staging,
    /// An explicitly named slot.
    Named(DeploymentName),
}

/// Runtime the deployment runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuntimeVersion {
    #[serde(rename = "Java_8")]
    Java8,
    #[serde(rename = "Java_11")]
    Java11,
    #[serde(rename = "NetCore_31")]
    NetCore31,
}

impl RuntimeVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeVersion::Java8 => "Java_8",
            RuntimeVersion::Java11 => "Java_11",
            RuntimeVersion::NetCore31 => "NetCore_31",
        }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeVersion {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "java8" => Ok(RuntimeVersion::Java8),
            "java11" => Ok(RuntimeVersion::Java11),
            "netcore31" => Ok(RuntimeVersion::NetCore31),
            _ => Err(RequestError::UnknownRuntimeVersion(s.to_string())),
        }
    }
}

/// Runtime metadata forwarded with a deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentSettings {
    pub runtime_version: Option<RuntimeVersion>,
    pub jvm_options: Option<String>,
    pub net_core_main_entry_path: Option<String>,
    /// Version tag of the uploaded artifact.
    pub version: Option<String>,
    pub environment_variables: BTreeMap<String, String>,
}

/// What one invocation should do.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    action: Action,
    target: SlotSelector,
    allow_create: bool,
    package: Option<PathBuf>,
    settings: DeploymentSettings,
}

impl DeploymentRequest {
    /// Build a request, enforcing that an explicit target carries a name and that
    /// deploys carry a package. A name given alongside `use_staging` is dropped.
    pub fn new(
        action: Action,
        use_staging: bool,
        deployment_name: Option<DeploymentName>,
        allow_create: bool,
        package: Option<PathBuf>,
        settings: DeploymentSettings,
    ) -> Result<Self, RequestError> {
        let target = if use_staging {
            SlotSelector::Staging
        } else {
            SlotSelector::Named(deployment_name.ok_or(RequestError::MissingDeploymentName)?)
        };

        let package = match action {
            Action::Deploy => Some(package.ok_or(RequestError::MissingPackage)?),
            Action::Promote | Action::DeleteStaging => None,
        };

        Ok(Self {
            action,
            target,
            allow_create,
            package,
            settings,
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn target(&self) -> &SlotSelector {
        &self.target
    }

    pub fn uses_staging(&self) -> bool {
        self.target == SlotSelector::Staging
    }

    pub fn allow_create(&self) -> bool {
        self.allow_create
    }

    pub fn package(&self) -> Option<&Path> {
        self.package.as_deref()
    }

    pub fn settings(&self) -> &DeploymentSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_requires_a_name() {
        let err = DeploymentRequest::new(
            Action::Promote,
            false,
            None,
            false,
            None,
            DeploymentSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::MissingDeploymentName));
    }

    #[test]
    fn deploy_requires_a_package() {
        let err = DeploymentRequest::new(
            Action::Deploy,
            true,
            None,
            true,
            None,
            DeploymentSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::MissingPackage));
    }

    #[test]
    fn package_is_dropped_for_non_deploy_actions() {
        let request = DeploymentRequest::new(
            Action::DeleteStaging,
            true,
            None,
            false,
            Some(PathBuf::from("app.jar")),
            DeploymentSettings::default(),
        )
        .unwrap();
        assert!(request.package().is_none());
        assert!(request.uses_staging());
    }

    #[test]
    fn runtime_versions_parse_loosely() {
        assert_eq!(
            "Java_11".parse::<RuntimeVersion>().unwrap(),
            RuntimeVersion::Java11
        );
        assert_eq!(
            "java8".parse::<RuntimeVersion>().unwrap(),
            RuntimeVersion::Java8
        );
        assert_eq!(
            "NetCore_31".parse::<RuntimeVersion>().unwrap(),
            RuntimeVersion::NetCore31
        );
        assert!("Python_3".parse::<RuntimeVersion>().is_err());
    }
}
