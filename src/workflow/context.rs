//! Workflow context
//!
//! This module defines the shared state passed into the signing workflow,
//! replacing what would otherwise be ambient globals.

use std::path::{Path, PathBuf};

use crate::transport::tsa_endpoint;

/// Context for one signing invocation
///
/// Holds the signatures directory, the working directory used to shorten
/// paths in log output, and the Time-Stamp Authority endpoint.
#[derive(Debug, Clone)]
pub struct SignContext {
    /// Directory holding signature artifacts and the trust anchors
    pub sigs_dir: PathBuf,
    /// Parent of the signatures directory; log output renders paths
    /// relative to it when possible
    pub work_dir: PathBuf,
    /// Time-Stamp Authority endpoint the query is submitted to
    pub tsa_endpoint: String,
}

impl SignContext {
    /// Creates a context from a resolved signatures directory
    pub fn new(sigs_dir: PathBuf) -> Self {
        let work_dir = sigs_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| sigs_dir.clone());
        SignContext {
            sigs_dir,
            work_dir,
            tsa_endpoint: tsa_endpoint(),
        }
    }

    /// Renders a path relative to the working directory for readability
    ///
    /// Falls back to the absolute path when the file lives outside the
    /// working directory.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.work_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
