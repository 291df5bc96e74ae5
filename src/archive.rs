//! In-memory ZIP archive assembly
//!
//! Takes the successful download outcomes, in original request order, and
//! produces one contiguous byte buffer holding a standard ZIP archive.
//! Member insertion order matches the order given, so the archive layout is
//! deterministic regardless of the order fetches completed in.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;

use tracing::debug;
use zip::write::{FileOptions, ZipWriter};

use crate::error::Result;
use crate::types::DownloadedFile;

/// Maximum number of rename attempts when resolving member name collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Build a ZIP archive from successfully downloaded files
///
/// One member is written per file, named by `file.name`, in the order
/// given. Duplicate names are auto-suffixed (`doc.pdf`, `doc (1).pdf`,
/// ...) so no payload is silently dropped; see [`unique_member_name`].
///
/// The whole archive is materialized in memory — size is bounded only by
/// available memory.
pub fn build_zip(files: &[DownloadedFile]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    let mut used_names = HashSet::new();
    for file in files {
        let member_name = unique_member_name(&file.name, &mut used_names);
        writer.start_file(member_name, options)?;
        writer.write_all(&file.data)?;
    }

    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();

    debug!(members = files.len(), bytes = bytes.len(), "ZIP archive built");
    Ok(bytes)
}

/// Resolve a member name against the names already written
///
/// The first occurrence keeps its name; later occurrences get a ` (1)`,
/// ` (2)`, ... suffix inserted before the extension, mirroring how file
/// managers rename colliding downloads. Falls back to the bare name if
/// 9999 suffixes are somehow taken.
fn unique_member_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let extension = path.extension().and_then(|e| e.to_str());

    for i in 1..=MAX_RENAME_ATTEMPTS {
        let candidate = match extension {
            Some(ext) => format!("{} ({}).{}", stem, i, ext),
            None => format!("{} ({})", stem, i),
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }

    // ZIP itself permits duplicate member names, so this is still a
    // readable archive, just with tool-dependent extraction semantics
    name.to_string()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn file(name: &str, data: &[u8]) -> DownloadedFile {
        DownloadedFile {
            name: name.to_string(),
            data: data.to_vec(),
            error: None,
        }
    }

    fn member_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn member_bytes(bytes: &[u8], name: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut member = archive.by_name(name).unwrap();
        let mut out = Vec::new();
        member.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn archive_round_trips_members_in_input_order() {
        let bytes = build_zip(&[
            file("a.pdf", b"contents of a"),
            file("b.pdf", b"contents of b"),
            file("c.txt", b"plain text"),
        ])
        .unwrap();

        assert_eq!(member_names(&bytes), vec!["a.pdf", "b.pdf", "c.txt"]);
        assert_eq!(member_bytes(&bytes, "a.pdf"), b"contents of a");
        assert_eq!(member_bytes(&bytes, "b.pdf"), b"contents of b");
        assert_eq!(member_bytes(&bytes, "c.txt"), b"plain text");
    }

    #[test]
    fn duplicate_names_are_suffixed_in_order() {
        let bytes = build_zip(&[
            file("doc.pdf", b"first"),
            file("doc.pdf", b"second"),
            file("doc.pdf", b"third"),
        ])
        .unwrap();

        assert_eq!(
            member_names(&bytes),
            vec!["doc.pdf", "doc (1).pdf", "doc (2).pdf"]
        );
        assert_eq!(member_bytes(&bytes, "doc.pdf"), b"first");
        assert_eq!(member_bytes(&bytes, "doc (1).pdf"), b"second");
        assert_eq!(member_bytes(&bytes, "doc (2).pdf"), b"third");
    }

    #[test]
    fn duplicate_names_without_extension_are_suffixed() {
        let bytes = build_zip(&[file("README", b"one"), file("README", b"two")]).unwrap();
        assert_eq!(member_names(&bytes), vec!["README", "README (1)"]);
    }

    #[test]
    fn suffixing_skips_names_the_caller_already_used() {
        let bytes = build_zip(&[
            file("doc.pdf", b"first"),
            file("doc (1).pdf", b"explicit"),
            file("doc.pdf", b"second"),
        ])
        .unwrap();

        // The second "doc.pdf" cannot take "doc (1).pdf"; it moves on
        assert_eq!(
            member_names(&bytes),
            vec!["doc.pdf", "doc (1).pdf", "doc (2).pdf"]
        );
        assert_eq!(member_bytes(&bytes, "doc (2).pdf"), b"second");
    }

    #[test]
    fn empty_payload_members_are_preserved() {
        let bytes = build_zip(&[file("empty.bin", b""), file("full.bin", b"x")]).unwrap();
        assert_eq!(member_names(&bytes), vec!["empty.bin", "full.bin"]);
        assert!(member_bytes(&bytes, "empty.bin").is_empty());
    }

    #[test]
    fn empty_input_produces_a_valid_empty_archive() {
        let bytes = build_zip(&[]).unwrap();
        assert!(member_names(&bytes).is_empty());
    }

    #[test]
    fn member_set_is_identical_across_runs() {
        let inputs = vec![
            file("a.pdf", b"alpha"),
            file("b.pdf", b"beta"),
            file("a.pdf", b"alpha again"),
        ];
        let first = build_zip(&inputs).unwrap();
        let second = build_zip(&inputs).unwrap();

        assert_eq!(member_names(&first), member_names(&second));
        for name in member_names(&first) {
            assert_eq!(member_bytes(&first, &name), member_bytes(&second, &name));
        }
    }

    #[test]
    fn large_member_counts_are_not_truncated() {
        let inputs: Vec<DownloadedFile> = (0..500)
            .map(|i| file(&format!("file-{i:03}.bin"), format!("payload {i}").as_bytes()))
            .collect();
        let bytes = build_zip(&inputs).unwrap();

        let names = member_names(&bytes);
        assert_eq!(names.len(), 500);
        assert_eq!(names[0], "file-000.bin");
        assert_eq!(names[499], "file-499.bin");
        assert_eq!(member_bytes(&bytes, "file-123.bin"), b"payload 123");
    }
}
