// ABOUTME: Token acquisition through an already logged-in Azure CLI.
// ABOUTME: Runs `az account get-access-token` and parses its JSON output.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::process::Command;

use super::{AccessToken, CredentialError, TokenCredential};

#[derive(Debug, Clone)]
pub struct AzureCliCredential {
    program: String,
}

impl Default for AzureCliCredential {
    fn default() -> Self {
        Self {
            program: "az".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    #[serde(default, rename = "expires_on")]
    expires_on: Option<i64>,
}

impl AzureCliCredential {
    /// Use a specific `az` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for AzureCliCredential {
    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        tracing::debug!(%resource, "requesting token from Azure CLI");

        let output = Command::new(&self.program)
            .args([
                "account",
                "get-access-token",
                "--resource",
                resource,
                "--output",
                "json",
            ])
            .output()
            .await
            .map_err(|e| CredentialError::Cli(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CredentialError::Cli(stderr.trim().to_string()));
        }

        parse_cli_token(&output.stdout)
    }
}

fn parse_cli_token(stdout: &[u8]) -> Result<AccessToken, CredentialError> {
    let token: CliToken = serde_json::from_slice(stdout)?;
    let expires_on = token
        .expires_on
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    Ok(AccessToken::new(token.access_token, expires_on))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_output_with_expiry() {
        let json = br#"{
            "accessToken": "eyJ0eXAi",
            "expiresOn": "2030-01-01 00:00:00.000000",
            "expires_on": 1893456000,
            "subscription": "0000",
            "tokenType": "Bearer"
        }"#;
        let token = parse_cli_token(json).unwrap();
        assert_eq!(token.token, "eyJ0eXAi");
        assert_eq!(token.expires_on.unwrap().timestamp(), 1_893_456_000);
    }

    #[test]
    fn parses_older_cli_output_without_epoch() {
        let json = br#"{"accessToken": "tok", "expiresOn": "2030-01-01 00:00:00.000000"}"#;
        let token = parse_cli_token(json).unwrap();
        assert!(token.expires_on.is_none());
    }

    #[tokio::test]
    async fn missing_cli_is_reported() {
        let credential = AzureCliCredential::with_program("definitely-not-az-cli");
        let err = credential
            .get_token("https://management.azure.com/")
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::Cli(_)));
    }
}
