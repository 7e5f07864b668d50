// ABOUTME: Names of the task inputs and the environment variables that carry them.
// ABOUTME: A CI runner exposes input `foo-bar` as `INPUT_FOO-BAR`.

pub const AZURE_SUBSCRIPTION: &str = "azure-subscription";
pub const SERVICE_NAME: &str = "service-name";
pub const ACTION: &str = "action";
pub const APP_NAME: &str = "app-name";
pub const USE_STAGING_DEPLOYMENT: &str = "use-staging-deployment";
pub const CREATE_NEW_DEPLOYMENT: &str = "create-new-deployment";
pub const DEPLOYMENT_NAME: &str = "deployment-name";
pub const ENVIRONMENT_VARIABLES: &str = "environment-variables";
pub const JVM_OPTIONS: &str = "jvm-options";
pub const RUNTIME_VERSION: &str = "runtime-version";
pub const DOTNETCORE_MAINENTRY_PATH: &str = "dotnetcore-mainentry-path";
pub const VERSION: &str = "version";
pub const PACKAGE: &str = "package";

/// Environment variable names, one per input.
pub mod env {
    pub const AZURE_SUBSCRIPTION: &str = "INPUT_AZURE-SUBSCRIPTION";
    pub const SERVICE_NAME: &str = "INPUT_SERVICE-NAME";
    pub const ACTION: &str = "INPUT_ACTION";
    pub const APP_NAME: &str = "INPUT_APP-NAME";
    pub const USE_STAGING_DEPLOYMENT: &str = "INPUT_USE-STAGING-DEPLOYMENT";
    pub const CREATE_NEW_DEPLOYMENT: &str = "INPUT_CREATE-NEW-DEPLOYMENT";
    pub const DEPLOYMENT_NAME: &str = "INPUT_DEPLOYMENT-NAME";
    pub const ENVIRONMENT_VARIABLES: &str = "INPUT_ENVIRONMENT-VARIABLES";
    pub const JVM_OPTIONS: &str = "INPUT_JVM-OPTIONS";
    pub const RUNTIME_VERSION: &str = "INPUT_RUNTIME-VERSION";
    pub const DOTNETCORE_MAINENTRY_PATH: &str = "INPUT_DOTNETCORE-MAINENTRY-PATH";
    pub const VERSION: &str = "INPUT_VERSION";
    pub const PACKAGE: &str = "INPUT_PACKAGE";

    pub const MANAGEMENT_ENDPOINT: &str = "AZURE_RESOURCE_MANAGER_ENDPOINT";
}

/// Labels accepted by the `action` input.
pub mod actions {
    pub const DEPLOY: &str = "deploy";
    pub const SET_PRODUCTION: &str = "set production";
    pub const DELETE_STAGING_DEPLOYMENT: &str = "delete staging deployment";
}

/// Environment variable a runner uses for `input`.
pub fn env_name(input: &str) -> String {
    format!("INPUT_{}", input.replace(' ', "_").to_uppercase())
}
