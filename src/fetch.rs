//! Single-file fetching with per-file timeout
//!
//! [`fetch_file`] always resolves to a [`DownloadedFile`] — every failure
//! mode (bad URL, transport error, non-success status, timeout) is captured
//! into the outcome so the coordinator can aggregate a whole batch without
//! per-file error plumbing.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::types::{DownloadedFile, FileInput};

/// Fetch one file, converting every failure into the outcome
///
/// The request runs under `tokio::time::timeout`; expiry drops the
/// in-flight call, which cancels it. The timer is released as soon as the
/// transport call settles — the subsequent body read is not subject to it.
pub(crate) async fn fetch_file(
    client: &Client,
    file: &FileInput,
    timeout: Duration,
) -> DownloadedFile {
    match fetch_bytes(client, file, timeout).await {
        Ok(data) => {
            debug!(url = %file.url, name = %file.name, bytes = data.len(), "file fetched");
            DownloadedFile {
                name: file.name.clone(),
                data,
                error: None,
            }
        }
        Err(error) => {
            warn!(url = %file.url, name = %file.name, error = %error, "file fetch failed");
            DownloadedFile {
                name: file.name.clone(),
                data: Vec::new(),
                error: Some(error),
            }
        }
    }
}

async fn fetch_bytes(
    client: &Client,
    file: &FileInput,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    // Reject unparseable URLs before touching the network
    url::Url::parse(&file.url).map_err(|e| FetchError::InvalidUrl {
        url: file.url.clone(),
        message: e.to_string(),
    })?;

    let response = tokio::time::timeout(timeout, client.get(&file.url).send())
        .await
        .map_err(|_| FetchError::TimedOut {
            url: file.url.clone(),
            timeout_ms: timeout.as_millis() as u64,
        })?
        .map_err(|e| FetchError::Transport {
            url: file.url.clone(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: file.url.clone(),
            status,
        });
    }

    let body = response.bytes().await.map_err(|e| FetchError::Transport {
        url: file.url.clone(),
        message: e.to_string(),
    })?;

    Ok(body.to_vec())
}
