// ABOUTME: Authenticated reqwest client for the Azure Resource Manager endpoint.
// ABOUTME: Caches one bearer token and checks every response against the success set.

use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

use super::error::{
    ApiError, CredentialSnafu, DecodeSnafu, InvalidUrlSnafu, Operation, StatusSnafu,
    TransportSnafu,
};
use super::models::{Page, error_message};
use crate::credential::{AccessToken, TokenCredential};
use crate::types::SubscriptionId;

pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
pub const API_VERSION: &str = "2020-07-01";
/// Statuses accepted from every management call.
pub const SUCCESS_CODES: [u16; 3] = [200, 201, 202];
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub fn is_success(status: StatusCode) -> bool {
    SUCCESS_CODES.contains(&status.as_u16())
}

/// Client for the Spring Cloud management API of one subscription.
pub struct ManagementClient {
    pub(super) http: reqwest::Client,
    pub(super) endpoint: Url,
    pub(super) subscription: SubscriptionId,
    pub(super) api_version: String,
    pub(super) poll_interval: Duration,
    pub(super) wait_for_completion: bool,
    credential: Arc<dyn TokenCredential>,
    token: Mutex<Option<AccessToken>>,
}

impl std::fmt::Debug for ManagementClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("subscription", &self.subscription)
            .field("api_version", &self.api_version)
            .field("wait_for_completion", &self.wait_for_completion)
            .finish_non_exhaustive()
    }
}

impl ManagementClient {
    pub fn builder(
        subscription: SubscriptionId,
        credential: Arc<dyn TokenCredential>,
    ) -> ManagementClientBuilder {
        ManagementClientBuilder {
            subscription,
            credential,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: API_VERSION.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_for_completion: true,
        }
    }

    /// Token audience: the endpoint without a trailing slash.
    fn resource(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    /// Absolute URL for an ARM path, with the api-version query attached.
    pub(super) fn url(&self, operation: Operation, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}?api-version={}",
            self.resource(),
            path.trim_start_matches('/'),
            self.api_version
        );
        Url::parse(&raw).context(InvalidUrlSnafu {
            operation,
            url: raw.as_str(),
        })
    }

    async fn bearer(&self, operation: Operation) -> Result<String, ApiError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh_at(Utc::now())
        {
            return Ok(token.token.clone());
        }

        tracing::debug!(resource = self.resource(), "acquiring access token");
        let token = self
            .credential
            .get_token(self.resource())
            .await
            .context(CredentialSnafu { operation })?;
        let secret = token.token.clone();
        *cached = Some(token);
        Ok(secret)
    }

    pub(super) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Authenticate and send without judging the status.
    pub(super) async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let token = self.bearer(operation).await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .context(TransportSnafu { operation })?;
        tracing::debug!(%operation, status = response.status().as_u16(), url = %response.url(), "management response");
        Ok(response)
    }

    /// Authenticate, send, and fail unless the status is in the success set.
    pub(super) async fn execute(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = self.send(operation, request).await?;
        ensure_success(operation, response).await
    }

    /// Follow `nextLink` until every page of a list has been read.
    pub(super) async fn list_all<T: DeserializeOwned>(
        &self,
        operation: Operation,
        first: Url,
    ) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            let response = self
                .execute(operation, self.request(Method::GET, url))
                .await?;
            let page: Page<T> = read_json(operation, response).await?;
            items.extend(page.value);

            if let Some(link) = page.next_link.filter(|link| !link.is_empty()) {
                let url = Url::parse(&link).context(InvalidUrlSnafu {
                    operation,
                    url: link.as_str(),
                })?;
                next = Some(url);
            }
        }

        Ok(items)
    }
}

pub(super) async fn ensure_success(
    operation: Operation,
    response: Response,
) -> Result<Response, ApiError> {
    let status = response.status();
    if is_success(status) {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%operation, status = status.as_u16(), %body, "management call rejected");
    StatusSnafu {
        operation,
        status: status.as_u16(),
        message: error_message(&body),
    }
    .fail()
}

pub(super) async fn read_json<T: DeserializeOwned>(
    operation: Operation,
    response: Response,
) -> Result<T, ApiError> {
    let body = response
        .text()
        .await
        .context(TransportSnafu { operation })?;
    tracing::debug!(%operation, %body, "management response body");
    serde_json::from_str(&body).context(DecodeSnafu { operation })
}

/// Builder for [`ManagementClient`].
pub struct ManagementClientBuilder {
    subscription: SubscriptionId,
    credential: Arc<dyn TokenCredential>,
    endpoint: String,
    api_version: String,
    poll_interval: Duration,
    wait_for_completion: bool,
}

impl ManagementClientBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Delay between long-running operation status reads when the service sends no `Retry-After`.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn wait_for_completion(mut self, wait: bool) -> Self {
        self.wait_for_completion = wait;
        self
    }

    /// # Errors
    ///
    /// Fails when the endpoint is not an absolute URL.
    pub fn build(self) -> Result<ManagementClient, url::ParseError> {
        let endpoint = Url::parse(&self.endpoint)?;
        Ok(ManagementClient {
            http: reqwest::Client::new(),
            endpoint,
            subscription: self.subscription,
            api_version: self.api_version,
            poll_interval: self.poll_interval,
            wait_for_completion: self.wait_for_completion,
            credential: self.credential,
            token: Mutex::new(None),
        })
    }
}
