//! Archive delivery: buffer hand-back or save-to-disk
//!
//! The delivery adapter is the only component that looks at the runtime
//! environment. Headless contexts get the raw bytes back; interactive
//! contexts get a file written under the configured output directory,
//! with browser-style auto-renaming instead of overwriting an existing
//! file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::support::Environment;
use crate::types::Delivery;

/// Maximum number of rename attempts when resolving save collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Deliver a finished archive
///
/// - [`Environment::Headless`]: returns [`Delivery::Buffer`]; no
///   filesystem activity.
/// - [`Environment::Interactive`]: writes `output_dir/filename` and
///   returns [`Delivery::Saved`] once the write completes. An existing
///   file is never overwritten; the name is suffixed `stem (1).ext` etc.
pub fn deliver(
    archive: Vec<u8>,
    filename: &str,
    output_dir: &Path,
    environment: Environment,
) -> Result<Delivery> {
    match environment {
        Environment::Headless => Ok(Delivery::Buffer(archive)),
        Environment::Interactive => {
            let path = unique_save_path(&output_dir.join(filename));
            std::fs::write(&path, &archive)?;
            info!(path = %path.display(), bytes = archive.len(), "archive saved");
            Ok(Delivery::Saved(path))
        }
    }
}

/// Find a path that does not collide with an existing file
///
/// If `path` is free it is returned unchanged; otherwise ` (1)`, ` (2)`,
/// ... is inserted before the extension until a free name is found. After
/// 9999 attempts the original path is returned and the write overwrites.
fn unique_save_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("download");
    let extension = path.extension().and_then(|e| e.to_str());
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..=MAX_RENAME_ATTEMPTS {
        let candidate = match extension {
            Some(ext) => parent.join(format!("{} ({}).{}", stem, i, ext)),
            None => parent.join(format!("{} ({})", stem, i)),
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    path.to_path_buf()
}
