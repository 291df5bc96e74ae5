//! Batch download orchestration
//!
//! The [`BatchDownloader`] owns the HTTP client, the operation options and
//! the event sink for one or more batch operations. The fan-out/aggregation
//! loop itself lives in [`coordinator`]; archive assembly and delivery are
//! delegated to the [`archive`](crate::archive) and
//! [`delivery`](crate::delivery) modules.

mod coordinator;


use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::archive;
use crate::config::DownloadOptions;
use crate::delivery;
use crate::error::{Error, Result};
use crate::support::{self, Environment};
use crate::types::{Delivery, DownloadEvents, FileInput, NoEvents};

/// Concurrent batch downloader producing a single ZIP archive
///
/// One instance can run any number of batch operations; each operation is
/// independent and nothing persists across them.
///
/// # Example
///
/// ```no_run
/// use batchzip::{BatchDownloader, DownloadOptions, FileInput};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = BatchDownloader::new(DownloadOptions::default())?;
///
/// let archive = downloader
///     .create_zip(&[
///         FileInput::new("https://example.com/file1.pdf", "Document A.pdf"),
///         FileInput::new("https://example.com/file2.pdf", "Document B.pdf"),
///     ])
///     .await?;
///
/// std::fs::write("documents.zip", archive)?;
/// # Ok(())
/// # }
/// ```
pub struct BatchDownloader {
    /// Shared HTTP client; transport overrides are baked in as default
    /// headers so every fetch carries them
    client: Client,
    /// Operation options, read-only once the downloader exists
    options: DownloadOptions,
    /// Event sink driven from the aggregation loop
    events: Arc<dyn DownloadEvents>,
}

impl BatchDownloader {
    /// Create a downloader from options, building the shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `options.headers` contains an invalid
    /// header name or value, or [`Error::Network`] if the HTTP client
    /// cannot be constructed.
    pub fn new(options: DownloadOptions) -> Result<Self> {
        let headers = build_header_map(&options)?;
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            options,
            events: Arc::new(NoEvents),
        })
    }

    /// Create a downloader around a caller-built HTTP client
    ///
    /// The escape hatch for transport overrides beyond plain headers
    /// (proxies, custom TLS, connection pooling). `options.headers` is
    /// ignored in favor of whatever the client was built with.
    pub fn with_client(options: DownloadOptions, client: Client) -> Self {
        Self {
            client,
            options,
            events: Arc::new(NoEvents),
        }
    }

    /// Install an event sink for progress and error reporting
    #[must_use]
    pub fn with_events(mut self, events: impl DownloadEvents + 'static) -> Self {
        self.events = Arc::new(events);
        self
    }

    /// The options this downloader was built with
    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Download all files and build the ZIP archive, returning its bytes
    ///
    /// This is the environment-agnostic core operation: the caller decides
    /// what to do with the buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedRuntime`] if the capability check fails
    /// - [`Error::EmptyInput`] if `files` is empty
    /// - [`Error::AllDownloadsFailed`] if nothing could be fetched
    /// - [`Error::Fetch`] for the first failure when
    ///   `continue_on_error = false`
    /// - [`Error::Zip`] if archive assembly fails
    pub async fn create_zip(&self, files: &[FileInput]) -> Result<Vec<u8>> {
        ensure_supported()?;
        let downloaded = self.fetch_all(files).await?;
        archive::build_zip(&downloaded)
    }

    /// Download all files, build the ZIP archive, and deliver it
    ///
    /// In interactive contexts the archive is saved under
    /// `options.output_dir` as `options.zip_filename`; headless contexts
    /// (and `return_buffer = true`) get the bytes back instead.
    ///
    /// # Errors
    ///
    /// Everything [`create_zip`](Self::create_zip) can raise, plus
    /// [`Error::Io`] if the interactive save fails.
    pub async fn download_zip(&self, files: &[FileInput]) -> Result<Delivery> {
        let bytes = self.create_zip(files).await?;
        let environment = if self.options.return_buffer {
            Environment::Headless
        } else {
            support::detect_environment()
        };
        delivery::deliver(
            bytes,
            &self.options.zip_filename,
            &self.options.output_dir,
            environment,
        )
    }
}

/// Run the pre-flight capability check, converting failure into the error
/// raised before any fetch
fn ensure_supported() -> Result<()> {
    let status = support::check_support();
    if status.supported {
        Ok(())
    } else {
        Err(status.into_error())
    }
}

/// Convert the options' header overrides into a reqwest header map
fn build_header_map(options: &DownloadOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(options.headers.len());
    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::Config {
            message: format!("invalid header name {name:?}: {e}"),
            key: Some("headers".to_string()),
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| Error::Config {
            message: format!("invalid value for header {name}: {e}"),
            key: Some("headers".to_string()),
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}
