// ABOUTME: OAuth2 client-credentials flow for a service principal.
// ABOUTME: Exchanges tenant, client id, and secret for a management token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::fmt;

use super::{AccessToken, CredentialError, TokenCredential};

/// Service principal authenticated with a client secret.
#[derive(Clone)]
pub struct ClientSecretCredential {
    authority_host: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl ClientSecretCredential {
    pub fn new(
        authority_host: impl Into<String>,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            authority_host: authority_host.into(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http: reqwest::Client::new(),
        }
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            urlencoding::encode(&self.tenant_id)
        )
    }
}

impl fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("authority_host", &self.authority_host)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        let scope = format!("{}/.default", resource.trim_end_matches('/'));
        tracing::debug!(tenant = %self.tenant_id, %scope, "requesting service principal token");

        let response = self
            .http
            .post(self.token_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CredentialError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let expires_on = token
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Ok(AccessToken::new(token.access_token, expires_on))
    }
}
