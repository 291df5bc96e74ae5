//! Configuration types for batchzip

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf, time::Duration};

/// Options for one batch download operation
///
/// Read-only for the duration of the operation. Works out of the box with
/// zero configuration: `DownloadOptions::default()` fetches with a 30 second
/// per-file timeout, continues past individual failures, and names the
/// archive `download.zip`.
///
/// All fields have serde defaults, so options can be loaded from partial
/// JSON/TOML documents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Name of the ZIP file to create when delivering interactively
    /// (default: "download.zip")
    #[serde(default = "default_zip_filename")]
    pub zip_filename: String,

    /// Per-file fetch timeout (default: 30 seconds, serialized as
    /// milliseconds)
    ///
    /// Each file carries its own independent timer; expiry cancels only
    /// that file's in-flight request.
    #[serde(default = "default_timeout", with = "duration_millis")]
    pub timeout: Duration,

    /// Whether to continue downloading remaining files if one fails
    /// (default: true)
    ///
    /// When false, the first failure aborts the whole operation and
    /// cancels the remaining in-flight fetches.
    #[serde(default = "default_true")]
    pub continue_on_error: bool,

    /// If true, skip interactive delivery and return the archive bytes
    /// even in interactive contexts (default: false)
    #[serde(default)]
    pub return_buffer: bool,

    /// Directory interactive deliveries are saved into (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extra request headers merged into every fetch (authorization,
    /// cookies, etc.)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            zip_filename: default_zip_filename(),
            timeout: default_timeout(),
            continue_on_error: true,
            return_buffer: false,
            output_dir: default_output_dir(),
            headers: HashMap::new(),
        }
    }
}

impl DownloadOptions {
    /// The per-file timeout in whole milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

fn default_zip_filename() -> String {
    "download.zip".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

// Duration serialization helper (milliseconds on the wire)
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
