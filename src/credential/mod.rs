// ABOUTME: Bearer token acquisition for the management API.
// ABOUTME: Environment token, service principal secret, or the Azure CLI, in that order.

mod azure_cli;
mod client_secret;
mod error;

pub use azure_cli::AzureCliCredential;
pub use client_secret::ClientSecretCredential;
pub use error::CredentialError;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";
pub const TENANT_ID_ENV: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID_ENV: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "AZURE_CLIENT_SECRET";
pub const AUTHORITY_HOST_ENV: &str = "AZURE_AUTHORITY_HOST";

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Tokens closer than this to expiry are fetched again.
const EXPIRY_MARGIN_SECS: i64 = 120;

/// An opaque bearer token.
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }

    /// Whether the token can still be used at `now`. Tokens without a known expiry
    /// are assumed to outlive the invocation.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_on
            .is_none_or(|expiry| expiry - Duration::seconds(EXPIRY_MARGIN_SECS) > now)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Source of bearer tokens for a resource audience such as
/// `https://management.azure.com/`.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError>;
}

/// A fixed token, typically minted by an earlier CI step.
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticTokenCredential")
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _resource: &str) -> Result<AccessToken, CredentialError> {
        Ok(AccessToken::new(self.token.clone(), None))
    }
}

/// Credential chosen from the environment.
#[derive(Debug)]
pub enum DefaultCredential {
    Static(StaticTokenCredential),
    ClientSecret(ClientSecretCredential),
    AzureCli(AzureCliCredential),
}

impl DefaultCredential {
    /// Pick a credential from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Pick a credential using `lookup` to read variables. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = get(ACCESS_TOKEN_ENV) {
            return DefaultCredential::Static(StaticTokenCredential::new(token));
        }

        if let (Some(tenant), Some(client), Some(secret)) = (
            get(TENANT_ID_ENV),
            get(CLIENT_ID_ENV),
            get(CLIENT_SECRET_ENV),
        ) {
            let authority =
                get(AUTHORITY_HOST_ENV).unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());
            return DefaultCredential::ClientSecret(ClientSecretCredential::new(
                authority, tenant, client, secret,
            ));
        }

        DefaultCredential::AzureCli(AzureCliCredential::default())
    }
}

#[async_trait]
impl TokenCredential for DefaultCredential {
    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        match self {
            DefaultCredential::Static(c) => c.get_token(resource).await,
            DefaultCredential::ClientSecret(c) => c.get_token(resource).await,
            DefaultCredential::AzureCli(c) => c.get_token(resource).await,
        }
    }
}
