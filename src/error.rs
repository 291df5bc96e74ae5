//! Error types for batchzip
//!
//! This module provides the error handling for the library:
//! - The top-level [`Error`] type returned by batch operations
//! - The per-file [`FetchError`] type captured into download outcomes
//!
//! Per-file failures are never raised directly while a batch is running;
//! they are folded into [`DownloadedFile`](crate::types::DownloadedFile)
//! outcomes and surfaced through the event sink, unless the caller opted
//! into fail-fast behavior via `continue_on_error = false`.

use thiserror::Error;

/// Result type alias for batchzip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for batchzip
///
/// This is the primary error type used throughout the library. Each variant
/// includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// No files were provided to the batch operation
    ///
    /// Raised before any network activity takes place.
    #[error("no files provided to download")]
    EmptyInput,

    /// Every file in the batch failed to download
    ///
    /// Raised after aggregation completes with zero successes; the archive
    /// is never built in this case.
    #[error("all file downloads failed")]
    AllDownloadsFailed,

    /// The hosting runtime is missing required capabilities
    ///
    /// Raised by the pre-flight capability check before any fetch is
    /// attempted. The message lists every missing capability, not just the
    /// first.
    #[error("unsupported runtime: missing {}", .missing.join(", "))]
    UnsupportedRuntime {
        /// Every capability the capability check found missing
        missing: Vec<String>,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "headers")
        key: Option<String>,
    },

    /// A file fetch failed on the fail-fast path
    ///
    /// Only surfaced as a terminal error when `continue_on_error = false`;
    /// otherwise fetch failures stay inside their outcome.
    #[error("download error: {0}")]
    Fetch(#[from] FetchError),

    /// ZIP archive assembly failed
    #[error("failed to build ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error (interactive delivery writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (HTTP client construction)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Per-file fetch failure
///
/// Captured into [`DownloadedFile::error`](crate::types::DownloadedFile)
/// by the single-item fetcher. Cloneable so the same failure can be handed
/// to the event sink and, on the fail-fast path, become the terminal error.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The server responded with a non-success HTTP status
    #[error("failed to fetch {url}: {status}")]
    Http {
        /// The URL that was requested
        url: String,
        /// The response status, displayed as e.g. "404 Not Found"
        status: reqwest::StatusCode,
    },

    /// The fetch did not settle within the per-file timeout
    #[error("failed to fetch {url}: timed out after {timeout_ms} ms")]
    TimedOut {
        /// The URL that was requested
        url: String,
        /// The configured per-file timeout in milliseconds
        timeout_ms: u64,
    },

    /// The transport layer failed (DNS, connect, TLS, interrupted body)
    #[error("failed to fetch {url}: {message}")]
    Transport {
        /// The URL that was requested
        url: String,
        /// Message from the underlying transport error
        message: String,
    },

    /// The URL could not be parsed; no network call was attempted
    #[error("invalid URL {url}: {message}")]
    InvalidUrl {
        /// The input that failed to parse
        url: String,
        /// Message from the URL parser
        message: String,
    },
}

impl FetchError {
    /// The URL this failure relates to
    pub fn url(&self) -> &str {
        match self {
            FetchError::Http { url, .. }
            | FetchError::TimedOut { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::InvalidUrl { url, .. } => url,
        }
    }
}
