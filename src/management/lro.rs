// ABOUTME: Long-running operation tracking for mutating management calls.
// ABOUTME: Follows Azure-AsyncOperation or Location headers until a terminal state.

use reqwest::header::{HeaderMap, LOCATION, RETRY_AFTER};
use reqwest::{Method, Response, StatusCode};
use std::time::Duration;
use url::Url;

use super::client::{ManagementClient, ensure_success, read_json};
use super::error::{ApiError, Operation, StatusSnafu, UnsuccessfulSnafu};
use super::models::{AsyncOperationStatus, error_message};

const ASYNC_OPERATION: &str = "azure-asyncoperation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Monitor {
    /// Status document with a `status` field.
    AsyncOperation(Url),
    /// Answers 202 while running.
    Location(Url),
}

/// Where to observe a pending operation, preferring `Azure-AsyncOperation`.
pub(super) fn monitor(headers: &HeaderMap) -> Option<Monitor> {
    let parse = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Url::parse(value).ok())
    };

    parse(ASYNC_OPERATION)
        .map(Monitor::AsyncOperation)
        .or_else(|| parse(LOCATION.as_str()).map(Monitor::Location))
}

/// `Retry-After` in whole seconds.
pub(super) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[derive(Debug, PartialEq, Eq)]
enum Progress {
    Running,
    Succeeded,
    Failed(String),
}

fn classify(status: &str) -> Progress {
    if status.eq_ignore_ascii_case("succeeded") {
        Progress::Succeeded
    } else if ["failed", "canceled", "cancelled"]
        .iter()
        .any(|terminal| status.eq_ignore_ascii_case(terminal))
    {
        Progress::Failed(status.to_string())
    } else {
        Progress::Running
    }
}

impl ManagementClient {
    /// Block until the operation behind `response` settles.
    ///
    /// Returns immediately when waiting is disabled, the call completed synchronously,
    /// or the service named no monitor URL.
    pub(super) async fn wait_for(
        &self,
        operation: Operation,
        response: Response,
    ) -> Result<(), ApiError> {
        if !self.wait_for_completion {
            return Ok(());
        }
        if !matches!(response.status(), StatusCode::CREATED | StatusCode::ACCEPTED) {
            return Ok(());
        }
        let Some(monitor) = monitor(response.headers()) else {
            return Ok(());
        };

        tracing::info!(%operation, "waiting for operation to complete");
        let mut delay = retry_after(response.headers()).unwrap_or(self.poll_interval);

        loop {
            tokio::time::sleep(delay).await;

            let (url, is_location) = match &monitor {
                Monitor::AsyncOperation(url) => (url.clone(), false),
                Monitor::Location(url) => (url.clone(), true),
            };
            let response = self
                .send(operation, self.request(Method::GET, url))
                .await?;
            delay = retry_after(response.headers()).unwrap_or(self.poll_interval);

            if is_location {
                match response.status() {
                    StatusCode::ACCEPTED => continue,
                    StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => return Ok(()),
                    status => {
                        let body = response.text().await.unwrap_or_default();
                        return StatusSnafu {
                            operation,
                            status: status.as_u16(),
                            message: error_message(&body),
                        }
                        .fail();
                    }
                }
            }

            let response = ensure_success(operation, response).await?;
            let document: AsyncOperationStatus = read_json(operation, response).await?;
            match classify(&document.status) {
                Progress::Running => {
                    tracing::debug!(%operation, status = %document.status, "operation still running");
                }
                Progress::Succeeded => return Ok(()),
                Progress::Failed(status) => {
                    return UnsuccessfulSnafu { operation, status }.fail();
                }
            }
        }
    }
}
