//! Runtime capability checking and environment detection
//!
//! Before any fetch is attempted, the batch operations verify that the
//! hosting runtime exposes the primitives the engine needs: a Tokio
//! runtime (async executor, timers, cancellation) and a constructible
//! HTTP client (network fetch, TLS backend). The check reports every
//! missing capability, not just the first, and never fails itself.
//!
//! Environment detection decides the delivery representation: processes
//! attached to a terminal get a saved file, everything else (CI, pipes,
//! services) gets the raw buffer.

use std::io::IsTerminal;

use crate::error::Error;

/// Capability name reported when no Tokio runtime is active
const CAP_RUNTIME: &str = "Tokio async runtime (call from within a Tokio context)";

/// Capability name reported when the HTTP client cannot be constructed
const CAP_HTTP_CLIENT: &str = "HTTP client (TLS backend unavailable)";

/// Result of the pre-flight capability check
#[derive(Clone, Debug)]
pub struct SupportStatus {
    /// Whether every required capability is present
    pub supported: bool,
    /// Every capability found missing
    pub missing: Vec<String>,
}

impl SupportStatus {
    /// A user-friendly message listing the missing capabilities, or `None`
    /// if the runtime is supported
    pub fn unsupported_message(&self) -> Option<String> {
        if self.supported {
            return None;
        }
        Some(format!(
            "runtime is missing required capabilities: {}",
            self.missing.join(", ")
        ))
    }

    /// Convert an unsupported status into the error the batch operations
    /// raise before any fetch
    pub(crate) fn into_error(self) -> Error {
        Error::UnsupportedRuntime {
            missing: self.missing,
        }
    }
}

/// Check whether the hosting runtime supports batch downloads
///
/// Inspects the runtime for every required capability and returns them
/// all. Emits a `tracing` warning per missing capability; never panics
/// and never returns an error itself.
pub fn check_support() -> SupportStatus {
    let mut missing = Vec::new();

    if tokio::runtime::Handle::try_current().is_err() {
        tracing::warn!("no Tokio runtime handle; timers and fetch tasks cannot be driven");
        missing.push(CAP_RUNTIME.to_string());
    }

    if let Err(e) = reqwest::Client::builder().build() {
        tracing::warn!(error = %e, "HTTP client construction failed");
        missing.push(CAP_HTTP_CLIENT.to_string());
    }

    SupportStatus {
        supported: missing.is_empty(),
        missing,
    }
}

/// The delivery context the process is running in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    /// A terminal-attached process; delivery saves the archive to disk
    Interactive,
    /// A non-interactive context (CI, pipe, service); delivery returns
    /// the archive bytes
    Headless,
}

/// Detect the current delivery environment
///
/// Pure and idempotent: the answer depends only on whether stdout is a
/// terminal.
pub fn detect_environment() -> Environment {
    if std::io::stdout().is_terminal() {
        Environment::Interactive
    } else {
        Environment::Headless
    }
}
