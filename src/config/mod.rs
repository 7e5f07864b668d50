// ABOUTME: Invocation parameters: CLI flags, INPUT_* variables, and the optional YAML file.
// ABOUTME: Merges the layers and validates them into a target and a deployment request.

mod env_pairs;
mod env_value;
pub mod inputs;

pub use env_pairs::parse_env_pairs;
pub use env_value::{EnvValue, resolve_env_map};

use crate::deploy::{Action, DeploymentRequest, DeploymentSettings, RuntimeVersion};
use crate::error::{Error, Result};
use crate::locator::TargetSpec;
use crate::management::{DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL};
use crate::types::{AppName, DeploymentName, ServiceName, SubscriptionId};
use clap::Args;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "asc-deploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "asc-deploy.yaml";

/// Task inputs as flags. Each flag falls back to its `INPUT_*` variable.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Subscription that holds the service instance
    #[arg(long, env = inputs::env::AZURE_SUBSCRIPTION)]
    pub azure_subscription: Option<String>,

    /// Spring Cloud service instance name
    #[arg(long, env = inputs::env::SERVICE_NAME)]
    pub service_name: Option<String>,

    /// deploy, set production, or delete staging deployment
    #[arg(long, env = inputs::env::ACTION)]
    pub action: Option<String>,

    /// App within the service instance
    #[arg(long, env = inputs::env::APP_NAME)]
    pub app_name: Option<String>,

    /// Target the staging deployment instead of a named one ("true" or "false")
    #[arg(long, env = inputs::env::USE_STAGING_DEPLOYMENT)]
    pub use_staging_deployment: Option<String>,

    /// Allow a missing deployment to be created ("true" or "false")
    #[arg(long, env = inputs::env::CREATE_NEW_DEPLOYMENT)]
    pub create_new_deployment: Option<String>,

    /// Explicit deployment to target
    #[arg(long, env = inputs::env::DEPLOYMENT_NAME)]
    pub deployment_name: Option<String>,

    /// Pairs in the form -KEY value -KEY2 "quoted value"
    #[arg(long, env = inputs::env::ENVIRONMENT_VARIABLES, allow_hyphen_values = true)]
    pub environment_variables: Option<String>,

    #[arg(long, env = inputs::env::JVM_OPTIONS, allow_hyphen_values = true)]
    pub jvm_options: Option<String>,

    /// Java_8, Java_11, or NetCore_31
    #[arg(long, env = inputs::env::RUNTIME_VERSION)]
    pub runtime_version: Option<String>,

    #[arg(long, env = inputs::env::DOTNETCORE_MAINENTRY_PATH)]
    pub dotnetcore_mainentry_path: Option<String>,

    /// Version tag recorded with the uploaded source
    #[arg(long, env = inputs::env::VERSION)]
    pub version: Option<String>,

    /// Jar, .NET Core zip, or source directory to deploy
    #[arg(long, env = inputs::env::PACKAGE)]
    pub package: Option<String>,

    /// Resource manager endpoint
    #[arg(long, env = inputs::env::MANAGEMENT_ENDPOINT)]
    pub management_endpoint: Option<String>,

    /// Return once a mutating call is accepted instead of waiting for it to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// Optional parameter file. Keys match the task input names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeployConfig {
    #[serde(default)]
    pub azure_subscription: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub use_staging_deployment: Option<bool>,
    #[serde(default)]
    pub create_new_deployment: Option<bool>,
    #[serde(default)]
    pub deployment_name: Option<String>,
    #[serde(default)]
    pub environment_variables: Option<String>,
    /// Merged beneath `environment-variables`; its entries lose on key collisions.
    #[serde(default)]
    pub env: HashMap<String, EnvValue>,
    #[serde(default)]
    pub jvm_options: Option<String>,
    #[serde(default)]
    pub runtime_version: Option<String>,
    #[serde(default)]
    pub dotnetcore_mainentry_path: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub package: Option<PathBuf>,
    #[serde(default)]
    pub management_endpoint: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub poll_interval: Option<Duration>,
    #[serde(default)]
    pub wait: Option<bool>,
}

impl DeployConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Load an explicitly named file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the parameter file from `dir` if one is there.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using parameter file");
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }
}

/// How the management client should be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub endpoint: String,
    pub poll_interval: Duration,
    pub wait_for_completion: bool,
}

/// Validated parameters for one invocation.
#[derive(Debug, Clone)]
pub struct Params {
    pub target: TargetSpec,
    pub request: DeploymentRequest,
    pub client: ClientOptions,
}

/// Runner inputs arrive as empty strings when unset.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// First non-empty value, flag/env layer before file layer.
fn pick<'a>(args: &'a Option<String>, file: Option<&'a Option<String>>) -> Option<&'a str> {
    present(args).or_else(|| file.and_then(present))
}

fn flag(args: &Option<String>, file: Option<bool>, default: bool) -> bool {
    match present(args) {
        Some(value) => value.eq_ignore_ascii_case("true"),
        None => file.unwrap_or(default),
    }
}

impl Params {
    /// Merge the flag/env layer over the file layer and validate.
    ///
    /// # Errors
    ///
    /// Fails when a required input is missing, a name or label is invalid, or the
    /// environment input cannot be parsed.
    pub fn resolve(args: &InputArgs, file: Option<&DeployConfig>) -> Result<Params> {
        let required = |name: &'static str, value: Option<&str>| -> Result<String> {
            value.map(str::to_string).ok_or(Error::MissingInput(name))
        };

        let subscription = required(
            inputs::AZURE_SUBSCRIPTION,
            pick(&args.azure_subscription, file.map(|f| &f.azure_subscription)),
        )?;
        let service = required(
            inputs::SERVICE_NAME,
            pick(&args.service_name, file.map(|f| &f.service_name)),
        )?;
        let app = required(
            inputs::APP_NAME,
            pick(&args.app_name, file.map(|f| &f.app_name)),
        )?;
        let action: Action = required(
            inputs::ACTION,
            pick(&args.action, file.map(|f| &f.action)),
        )?
        .parse()?;

        let target = TargetSpec {
            subscription: SubscriptionId::new(&subscription)?,
            service: ServiceName::new(&service)?,
            app: AppName::new(&app)?,
        };

        let use_staging = flag(
            &args.use_staging_deployment,
            file.and_then(|f| f.use_staging_deployment),
            true,
        );
        let allow_create = flag(
            &args.create_new_deployment,
            file.and_then(|f| f.create_new_deployment),
            false,
        );
        let raw_name = pick(&args.deployment_name, file.map(|f| &f.deployment_name));
        let deployment_name = if use_staging {
            if let Some(name) = raw_name {
                tracing::debug!(name, "deployment name ignored when targeting staging");
            }
            None
        } else {
            raw_name.map(DeploymentName::new).transpose()?
        };

        let package = if action == Action::Deploy {
            present(&args.package)
                .map(PathBuf::from)
                .or_else(|| file.and_then(|f| f.package.clone()))
        } else {
            None
        };

        let request = DeploymentRequest::new(
            action,
            use_staging,
            deployment_name,
            allow_create,
            package,
            Self::settings(args, file)?,
        )?;

        let endpoint = present(&args.management_endpoint)
            .or_else(|| file.and_then(|f| present(&f.management_endpoint)))
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string();
        let client = ClientOptions {
            endpoint,
            poll_interval: file
                .and_then(|f| f.poll_interval)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            wait_for_completion: !args.no_wait && file.and_then(|f| f.wait).unwrap_or(true),
        };

        Ok(Params {
            target,
            request,
            client,
        })
    }

    fn settings(args: &InputArgs, file: Option<&DeployConfig>) -> Result<DeploymentSettings> {
        let mut environment_variables = match file {
            Some(f) => resolve_env_map(&f.env)?,
            None => Default::default(),
        };
        if let Some(pairs) = pick(
            &args.environment_variables,
            file.map(|f| &f.environment_variables),
        ) {
            environment_variables.extend(parse_env_pairs(pairs)?);
        }

        let runtime_version = pick(&args.runtime_version, file.map(|f| &f.runtime_version))
            .map(str::parse::<RuntimeVersion>)
            .transpose()?;

        let owned = |value: Option<&str>| value.map(str::to_string);
        Ok(DeploymentSettings {
            runtime_version,
            jvm_options: owned(pick(&args.jvm_options, file.map(|f| &f.jvm_options))),
            net_core_main_entry_path: owned(pick(
                &args.dotnetcore_mainentry_path,
                file.map(|f| &f.dotnetcore_mainentry_path),
            )),
            version: owned(pick(&args.version, file.map(|f| &f.version))),
            environment_variables,
        })
    }
}
