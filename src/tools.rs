//! External tool invocation
//!
//! All cryptographic work is delegated to external binaries: gpg for
//! clearsigning and signature verification, openssl for RFC 3161 timestamp
//! queries and verification. Each invocation is synchronous and returns a
//! structured [`ToolOutput`] with the exit status and captured streams.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants::{ROOT_CERTIFICATE, TSA_CERTIFICATE};
use crate::errors::{Result, file_operation_error, tool_failure_error};

/// The marker gpg prints on its diagnostic stream for a valid signature
///
/// Kept as a substring contract for compatibility with gpg's output format.
const GOOD_SIGNATURE_MARKER: &str = "Good signature";

/// Structured result of one external tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally
    pub status: Option<i32>,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the tool exited with status zero
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run a tool with both output streams captured
fn run<I, S>(tool: &str, args: I) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| file_operation_error(e, tool.into(), "invoke"))?;

    Ok(ToolOutput {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Run a tool and fail with its own stderr if it exits non-zero
fn run_checked<I, S>(tool: &str, args: I) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = run(tool, args)?;
    if !output.success() {
        return Err(tool_failure_error(tool, output.status, &output.stderr));
    }
    Ok(output)
}

/// Detect the success marker in a verification diagnostic
pub fn is_good_signature(diagnostic: &str) -> bool {
    diagnostic.contains(GOOD_SIGNATURE_MARKER)
}

/// Clearsign a document, writing the wrapped output to the artifact path
///
/// The signer may prompt for a passphrase, so this is the one invocation
/// whose streams stay attached to the terminal; gpg's own messages go
/// straight to the operator.
pub fn clearsign(document: &Path, artifact: &Path) -> Result<()> {
    let status = Command::new("gpg")
        .arg("--output")
        .arg(artifact)
        .arg("--clearsign")
        .arg(document)
        .status()
        .map_err(|e| file_operation_error(e, "gpg".into(), "invoke"))?;

    if !status.success() {
        return Err(tool_failure_error("gpg", status.code(), ""));
    }
    Ok(())
}

/// Verify a clearsigned artifact, returning the full diagnostic output
///
/// gpg writes the verification report, including key and signing time, to
/// stderr. The caller decides success with [`is_good_signature`].
pub fn verify_signature(artifact: &Path) -> Result<ToolOutput> {
    run_checked("gpg", [OsStr::new("--verify"), artifact.as_os_str()])
}

/// Create a timestamp query for a document
///
/// Hashes the original document with SHA-512, requests the signer
/// certificate, and disables the nonce so the query is deterministic.
pub fn create_timestamp_query(document: &Path, query: &Path) -> Result<()> {
    run_checked(
        "openssl",
        [
            OsStr::new("ts"),
            OsStr::new("-query"),
            OsStr::new("-data"),
            document.as_os_str(),
            OsStr::new("-no_nonce"),
            OsStr::new("-sha512"),
            OsStr::new("-cert"),
            OsStr::new("-out"),
            query.as_os_str(),
        ],
    )?;
    Ok(())
}

/// Verify a timestamp response against its query and the trust chain
///
/// Uses the root certificate and intermediate TSA certificate from the
/// signatures directory. Returns the raw output either way; the exit code
/// is the success signal and the caller reports a non-zero result without
/// aborting.
pub fn verify_timestamp(sigs_dir: &Path, response: &Path, query: &Path) -> Result<ToolOutput> {
    let ca_file = sigs_dir.join(ROOT_CERTIFICATE);
    let untrusted = sigs_dir.join(TSA_CERTIFICATE);

    run(
        "openssl",
        [
            OsStr::new("ts"),
            OsStr::new("-verify"),
            OsStr::new("-in"),
            response.as_os_str(),
            OsStr::new("-queryfile"),
            query.as_os_str(),
            OsStr::new("-CAfile"),
            ca_file.as_os_str(),
            OsStr::new("-untrusted"),
            untrusted.as_os_str(),
        ],
    )
}
