//! # batchzip
//!
//! Concurrent batch downloader that bundles fetched files into a single
//! ZIP archive.
//!
//! ## Design Philosophy
//!
//! batchzip is designed to be:
//! - **Failure-tolerant** - One bad URL does not sink the batch; failures
//!   are accounted per file and the survivors still ship
//! - **Deterministic** - Archive member order always matches request
//!   order, no matter which fetch finished first
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use batchzip::{DownloadOptions, FileInput, download_zip_file};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = vec![
//!         FileInput::new("https://example.com/file1.pdf", "Document A.pdf"),
//!         FileInput::new("https://example.com/file2.pdf", "Document B.pdf"),
//!     ];
//!
//!     // Saves download.zip when attached to a terminal, returns the
//!     // bytes otherwise
//!     let delivery = download_zip_file(&files, DownloadOptions::default()).await?;
//!     println!("delivered: {delivery:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Progress Reporting
//!
//! ```no_run
//! use batchzip::{BatchDownloader, CallbackEvents, DownloadOptions, FileInput};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = BatchDownloader::new(DownloadOptions::default())?
//!     .with_events(
//!         CallbackEvents::new()
//!             .on_progress(|current, total| println!("{current}/{total}"))
//!             .on_error(|error, file| eprintln!("{}: {error}", file.name)),
//!     );
//!
//! let archive = downloader
//!     .create_zip(&[FileInput::new("https://example.com/a.pdf", "a.pdf")])
//!     .await?;
//! # let _ = archive;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// In-memory ZIP archive assembly
pub mod archive;
/// Batch download orchestration (fan-out, aggregation, events)
pub mod batch;
/// Configuration types
pub mod config;
/// Archive delivery (buffer hand-back or save-to-disk)
pub mod delivery;
/// Error types
pub mod error;
/// Runtime capability checking and environment detection
pub mod support;
/// Core types and events
pub mod types;

mod fetch;

// Re-export commonly used types
pub use batch::BatchDownloader;
pub use config::DownloadOptions;
pub use error::{Error, FetchError, Result};
pub use support::{Environment, SupportStatus, check_support, detect_environment};
pub use types::{
    CallbackEvents, Delivery, DownloadEvents, DownloadedFile, FileInput, NoEvents,
};

/// Download all files and return the ZIP archive bytes.
///
/// One-shot convenience over [`BatchDownloader::create_zip`]: the
/// environment-agnostic core operation, leaving the caller in charge of
/// the buffer.
///
/// # Example
///
/// ```no_run
/// use batchzip::{DownloadOptions, FileInput, create_zip_file};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let buffer = create_zip_file(
///     &[
///         FileInput::new("https://example.com/file1.pdf", "Document A.pdf"),
///         FileInput::new("https://example.com/file2.pdf", "Document B.pdf"),
///     ],
///     DownloadOptions::default(),
/// )
/// .await?;
///
/// tokio::fs::write("output.zip", buffer).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_zip_file(files: &[FileInput], options: DownloadOptions) -> Result<Vec<u8>> {
    BatchDownloader::new(options)?.create_zip(files).await
}

/// Download all files, build the ZIP archive, and deliver it.
///
/// One-shot convenience over [`BatchDownloader::download_zip`]: saves the
/// archive to disk in interactive contexts, returns the bytes in headless
/// ones (or whenever `options.return_buffer` is set).
pub async fn download_zip_file(files: &[FileInput], options: DownloadOptions) -> Result<Delivery> {
    BatchDownloader::new(options)?.download_zip(files).await
}
