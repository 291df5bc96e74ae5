//! Core types and events for batchzip

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One file to download and the name it will carry inside the archive
///
/// The batch places no uniqueness constraint on `name`; when two inputs
/// share a name, the archive builder suffixes the later one (`doc.pdf`,
/// `doc (1).pdf`, ...) so every downloaded payload survives into the
/// archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInput {
    /// The URL to fetch the file from
    pub url: String,
    /// The name to give the file in the ZIP archive
    pub name: String,
}

impl FileInput {
    /// Create a new file input
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// The outcome of fetching a single file
///
/// Produced exactly once per [`FileInput`] by the single-item fetcher.
/// A failed fetch carries an empty `data` and the failure in `error`.
#[derive(Clone, Debug)]
pub struct DownloadedFile {
    /// The archive member name this payload belongs to
    pub name: String,
    /// The fetched payload; empty on failure
    pub data: Vec<u8>,
    /// The failure, if the fetch did not succeed
    pub error: Option<FetchError>,
}

impl DownloadedFile {
    /// Whether the fetch succeeded
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// The result of delivering a finished archive
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The archive bytes, handed back to the caller (headless contexts,
    /// or `return_buffer = true`)
    Buffer(Vec<u8>),
    /// The path the archive was saved to (interactive contexts)
    Saved(PathBuf),
}

impl Delivery {
    /// The archive bytes, if this delivery returned a buffer
    pub fn into_buffer(self) -> Option<Vec<u8>> {
        match self {
            Delivery::Buffer(bytes) => Some(bytes),
            Delivery::Saved(_) => None,
        }
    }

    /// The saved path, if this delivery wrote a file
    pub fn saved_path(&self) -> Option<&std::path::Path> {
        match self {
            Delivery::Buffer(_) => None,
            Delivery::Saved(path) => Some(path),
        }
    }
}

/// Event sink for per-file batch progress
///
/// The coordinator invokes the sink synchronously as each fetch settles,
/// in completion order. Both methods default to no-ops so implementations
/// can subscribe to only the events they care about.
///
/// # Example
///
/// ```
/// use batchzip::{DownloadEvents, FileInput};
/// use batchzip::error::FetchError;
///
/// struct Logger;
///
/// impl DownloadEvents for Logger {
///     fn on_file_succeeded(&self, completed: usize, total: usize) {
///         println!("{completed}/{total}");
///     }
///
///     fn on_file_failed(&self, error: &FetchError, file: &FileInput) {
///         eprintln!("failed: {} ({error})", file.name);
///     }
/// }
/// ```
pub trait DownloadEvents: Send + Sync {
    /// Invoked once per successful file, with the number of successes so
    /// far and the total batch size
    ///
    /// `completed` increases strictly by one per call; failed files do not
    /// advance it.
    fn on_file_succeeded(&self, completed: usize, total: usize) {
        let _ = (completed, total);
    }

    /// Invoked once per failed file, with the failure and the original
    /// input
    fn on_file_failed(&self, error: &FetchError, file: &FileInput) {
        let _ = (error, file);
    }
}

// Shared sinks can be installed directly; the caller keeps its own handle
impl<T: DownloadEvents + ?Sized> DownloadEvents for std::sync::Arc<T> {
    fn on_file_succeeded(&self, completed: usize, total: usize) {
        (**self).on_file_succeeded(completed, total);
    }

    fn on_file_failed(&self, error: &FetchError, file: &FileInput) {
        (**self).on_file_failed(error, file);
    }
}

/// Silent event sink; the default when no sink is installed
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl DownloadEvents for NoEvents {}

/// Progress callback signature for [`CallbackEvents`]
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Error callback signature for [`CallbackEvents`]
pub type ErrorFn = Box<dyn Fn(&FetchError, &FileInput) + Send + Sync>;

/// Closure-based event sink
///
/// Adapts plain closures to [`DownloadEvents`] for callers that do not
/// want to define a sink type.
///
/// # Example
///
/// ```
/// use batchzip::CallbackEvents;
///
/// let events = CallbackEvents::new()
///     .on_progress(|current, total| println!("{current}/{total}"))
///     .on_error(|error, file| eprintln!("{}: {error}", file.name));
/// # let _ = events;
/// ```
#[derive(Default)]
pub struct CallbackEvents {
    progress: Option<ProgressFn>,
    error: Option<ErrorFn>,
}

impl CallbackEvents {
    /// Create an event sink with no callbacks installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a progress callback, invoked once per successful file
    #[must_use]
    pub fn on_progress(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Install an error callback, invoked once per failed file
    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&FetchError, &FileInput) + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl DownloadEvents for CallbackEvents {
    fn on_file_succeeded(&self, completed: usize, total: usize) {
        if let Some(f) = &self.progress {
            f(completed, total);
        }
    }

    fn on_file_failed(&self, error: &FetchError, file: &FileInput) {
        if let Some(f) = &self.error {
            f(error, file);
        }
    }
}

impl std::fmt::Debug for CallbackEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackEvents")
            .field("progress", &self.progress.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn file_input_new_accepts_str_and_string() {
        let a = FileInput::new("http://example.com/a.pdf", "a.pdf");
        let b = FileInput::new(
            String::from("http://example.com/a.pdf"),
            String::from("a.pdf"),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn file_input_round_trips_through_json() {
        let input = FileInput::new("http://example.com/report.pdf", "Report.pdf");
        let json = serde_json::to_string(&input).unwrap();
        let back: FileInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn downloaded_file_succeeded_tracks_error_presence() {
        let ok = DownloadedFile {
            name: "a.pdf".to_string(),
            data: vec![1, 2, 3],
            error: None,
        };
        assert!(ok.succeeded());

        let failed = DownloadedFile {
            name: "b.pdf".to_string(),
            data: Vec::new(),
            error: Some(FetchError::Transport {
                url: "http://example.com/b.pdf".to_string(),
                message: "connection reset".to_string(),
            }),
        };
        assert!(!failed.succeeded());
    }

    #[test]
    fn delivery_buffer_accessors() {
        let delivery = Delivery::Buffer(vec![0x50, 0x4b]);
        assert!(delivery.saved_path().is_none());
        assert_eq!(delivery.into_buffer().unwrap(), vec![0x50, 0x4b]);
    }

    #[test]
    fn delivery_saved_accessors() {
        let delivery = Delivery::Saved(PathBuf::from("/tmp/download.zip"));
        assert_eq!(
            delivery.saved_path().unwrap(),
            std::path::Path::new("/tmp/download.zip")
        );
        assert!(delivery.into_buffer().is_none());
    }

    #[test]
    fn no_events_ignores_everything() {
        // Just exercises the default no-op methods
        let sink = NoEvents;
        sink.on_file_succeeded(1, 2);
        sink.on_file_failed(
            &FetchError::Transport {
                url: "http://example.com".to_string(),
                message: "refused".to_string(),
            },
            &FileInput::new("http://example.com", "x"),
        );
    }

    #[test]
    fn callback_events_forwards_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let events = CallbackEvents::new().on_progress(move |current, total| {
            seen_clone.lock().unwrap().push((current, total));
        });

        events.on_file_succeeded(1, 3);
        events.on_file_succeeded(2, 3);
        // No error callback installed; must not panic
        events.on_file_failed(
            &FetchError::Transport {
                url: "http://example.com".to_string(),
                message: "refused".to_string(),
            },
            &FileInput::new("http://example.com", "x"),
        );

        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn callback_events_forwards_errors_with_original_input() {
        let failures = Arc::new(Mutex::new(Vec::new()));
        let failures_clone = Arc::clone(&failures);
        let events = CallbackEvents::new().on_error(move |error, file| {
            failures_clone
                .lock()
                .unwrap()
                .push((error.to_string(), file.name.clone()));
        });

        let file = FileInput::new("http://example.com/b.pdf", "b.pdf");
        events.on_file_failed(
            &FetchError::Http {
                url: file.url.clone(),
                status: reqwest::StatusCode::NOT_FOUND,
            },
            &file,
        );

        let failures = failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].0.contains("404"));
        assert_eq!(failures[0].1, "b.pdf");
    }
}
