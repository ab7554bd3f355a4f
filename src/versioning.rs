//! Versioned signature artifact naming
//!
//! Signature artifacts are named `<document-name>.<NNN>.asc` with a
//! zero-padded three-digit version. The next version for a document is one
//! greater than the highest version already present in the signatures
//! directory, starting at `000`.

use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{SIGNATURE_SUFFIX, VERSION_WIDTH};
use crate::errors::{Result, file_operation_error, glob_pattern_error, invalid_filename_error};

static VERSION_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(\d{3})\.asc$").expect("Failed to compile regex pattern for VERSION_SEGMENT")
});

/// Extract the version number from an artifact filename
///
/// Returns `None` for filenames that do not belong to the given document
/// or whose version segment is malformed.
pub fn parse_version(filename: &str, document_name: &str) -> Option<u32> {
    if !filename.starts_with(document_name)
        || filename.as_bytes().get(document_name.len()) != Some(&b'.')
    {
        return None;
    }
    // Everything between the document name and the version segment must be
    // the segment itself, so `notes.md.001.draft.asc` does not count.
    let tail = &filename[document_name.len()..];
    if tail.len() != VERSION_WIDTH + SIGNATURE_SUFFIX.len() + 2 {
        return None;
    }

    VERSION_SEGMENT
        .captures(filename)?
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Compute the next free version for a document in the signatures directory
///
/// Scans for sibling artifacts of the same document and returns
/// max observed + 1, or 0 when none exist. Artifacts belonging to other
/// documents are ignored.
pub fn next_version(sigs_dir: &Path, document_name: &str) -> Result<u32> {
    let pattern = sigs_dir
        .join(format!(
            "{}.*.{SIGNATURE_SUFFIX}",
            Pattern::escape(document_name)
        ))
        .to_str()
        .ok_or_else(|| invalid_filename_error(sigs_dir.to_path_buf()))?
        .to_string();

    let entries = glob(&pattern).map_err(|e| glob_pattern_error(e, &pattern))?;

    let mut version = 0;
    for entry in entries {
        let path =
            entry.map_err(|e| file_operation_error(e.into_error(), sigs_dir.to_path_buf(), "scan"))?;
        let filename = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if let Some(found) = parse_version(filename, document_name) {
            version = version.max(found + 1);
        }
    }

    Ok(version)
}

/// Build the artifact filename for a document and version
pub fn artifact_name(document_name: &str, version: u32) -> String {
    format!("{document_name}.{version:0VERSION_WIDTH$}.{SIGNATURE_SUFFIX}")
}

/// Build the full artifact path inside the signatures directory
pub fn artifact_path(sigs_dir: &Path, document_name: &str, version: u32) -> PathBuf {
    sigs_dir.join(artifact_name(document_name, version))
}
