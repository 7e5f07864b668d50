// ABOUTME: Artifact upload to the pre-signed Azure Files URL.
// ABOUTME: Creates the file at full size, then writes it in ranges of at most 4 MiB.

use bytes::Bytes;
use reqwest::header::CONTENT_LENGTH;
use snafu::ResultExt;
use std::path::Path;
use url::Url;

use super::client::{ManagementClient, ensure_success};
use super::error::{ApiError, InvalidUrlSnafu, Operation, ReadArtifactSnafu, TransportSnafu};

/// Largest range Azure Files accepts in one write.
pub(super) const MAX_RANGE: usize = 4 * 1024 * 1024;
const FILE_SERVICE_VERSION: &str = "2019-12-12";

/// Inclusive byte ranges covering `len` bytes.
pub(super) fn ranges(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len)
        .step_by(MAX_RANGE)
        .map(move |start| (start, (start + MAX_RANGE).min(len) - 1))
}

impl ManagementClient {
    /// Upload `path` to a SAS URL. The URL carries its own authorization.
    pub(super) async fn upload_file(&self, upload_url: &str, path: &Path) -> Result<(), ApiError> {
        let operation = Operation::UploadArtifact;
        let file_url = Url::parse(upload_url).context(InvalidUrlSnafu {
            operation,
            url: upload_url,
        })?;
        let data = Bytes::from(
            tokio::fs::read(path)
                .await
                .context(ReadArtifactSnafu { operation, path })?,
        );
        tracing::info!(path = %path.display(), bytes = data.len(), "uploading artifact");

        let create = self
            .http
            .put(file_url.clone())
            .header("x-ms-type", "file")
            .header("x-ms-content-length", data.len())
            .header("x-ms-version", FILE_SERVICE_VERSION)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await
            .context(TransportSnafu { operation })?;
        ensure_success(operation, create).await?;

        let mut range_url = file_url;
        range_url.query_pairs_mut().append_pair("comp", "range");

        for (start, end) in ranges(data.len()) {
            tracing::debug!(start, end, "writing range");
            let response = self
                .http
                .put(range_url.clone())
                .header("x-ms-range", format!("bytes={start}-{end}"))
                .header("x-ms-write", "update")
                .header("x-ms-version", FILE_SERVICE_VERSION)
                .body(data.slice(start..=end))
                .send()
                .await
                .context(TransportSnafu { operation })?;
            ensure_success(operation, response).await?;
        }

        Ok(())
    }
}
