//! Fan-out fetch coordination and outcome aggregation
//!
//! One Tokio task is spawned per file (unbounded fan-out, no queueing).
//! Join handles are polled through `FuturesUnordered`, so outcomes reach
//! the aggregation loop in completion order and all counter updates happen
//! at that single point — there is no shared mutable state between the
//! fetches themselves.

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fetch::fetch_file;
use crate::types::{DownloadedFile, FileInput};

use super::BatchDownloader;

/// What a spawned fetch task reports back: the original request position,
/// the input (for the error callback), and the outcome. `None` when the
/// task was cancelled before its fetch settled.
type TaskOutcome = Option<(usize, FileInput, DownloadedFile)>;

impl BatchDownloader {
    /// Fetch every file concurrently and return the successful outcomes in
    /// original request order
    ///
    /// Progress and error events fire in completion order as each fetch
    /// settles; the returned vector ignores completion order entirely.
    pub(super) async fn fetch_all(&self, files: &[FileInput]) -> Result<Vec<DownloadedFile>> {
        if files.is_empty() {
            return Err(Error::EmptyInput);
        }

        let total = files.len();
        debug!(total, timeout_ms = self.options.timeout_ms(), "starting batch fetch");

        let cancel = CancellationToken::new();
        // Cancels surviving fetch tasks whenever this function returns,
        // including the fail-fast early return below
        let _guard = cancel.clone().drop_guard();

        let mut in_flight: FuturesUnordered<JoinHandle<TaskOutcome>> = files
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, file)| {
                let client = self.client.clone();
                let timeout = self.options.timeout;
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => None,
                        outcome = fetch_file(&client, &file, timeout) => {
                            Some((index, file, outcome))
                        }
                    }
                })
            })
            .collect();

        // Successful outcomes keyed by request position; filled in
        // completion order, read out in request order
        let mut slots: Vec<Option<DownloadedFile>> = vec![None; total];
        let mut completed = 0usize;

        while let Some(joined) = in_flight.next().await {
            let Ok(Some((index, file, outcome))) = joined else {
                // Cancelled before settling, or the task panicked; either
                // way there is no outcome to account for
                continue;
            };

            match &outcome.error {
                None => {
                    completed += 1;
                    self.events.on_file_succeeded(completed, total);
                    slots[index] = Some(outcome);
                }
                Some(error) => {
                    self.events.on_file_failed(error, &file);
                    if !self.options.continue_on_error {
                        warn!(url = %file.url, error = %error, "aborting batch on first failure");
                        return Err(Error::Fetch(error.clone()));
                    }
                }
            }
        }

        if completed == 0 {
            return Err(Error::AllDownloadsFailed);
        }

        info!(
            succeeded = completed,
            failed = total - completed,
            total,
            "batch fetch finished"
        );
        Ok(slots.into_iter().flatten().collect())
    }
}
