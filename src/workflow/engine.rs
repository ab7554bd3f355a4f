//! Workflow engine
//!
//! Drives the linear signing sequence: dispatch on file type, resolve the
//! next artifact version, clearsign, self-verify, create and submit the
//! timestamp query, and verify the returned timestamp. Every step before
//! the final verification aborts the workflow on failure; the final
//! verification only reports, since by then the document is already
//! signed and timestamped.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::constants::{CLEARSIGN_EXTENSIONS, QUERY_SUFFIX, RESPONSE_SUFFIX};
use crate::errors::{
    Result, invalid_filename_error, missing_artifact_error, unsupported_file_type_error,
};
use crate::logging::{error_message, highlight_message, success_message, warning_message};
use crate::tools;
use crate::transport;
use crate::versioning::{artifact_path, next_version};

use super::context::SignContext;

/// Signing strategy selected from the document's file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningStrategy {
    /// Human-readable wrapped signature via gpg --clearsign
    Clearsign,
}

impl SigningStrategy {
    /// Selects the strategy for a document, rejecting unsupported types
    ///
    /// Dispatch happens before any artifact is created, so an unsupported
    /// extension leaves the signatures directory untouched.
    pub fn for_document(document: &Path) -> Result<Self> {
        let extension = document
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        if CLEARSIGN_EXTENSIONS.contains(&extension) {
            Ok(SigningStrategy::Clearsign)
        } else {
            Err(unsupported_file_type_error(
                document.to_path_buf(),
                extension,
            ))
        }
    }
}

/// Artifacts produced by a completed signing run
///
/// A run that halts at the self-verification step still produced the
/// signature artifact; the timestamp fields are then absent.
#[derive(Debug, Clone)]
pub struct SignOutcome {
    /// The clearsigned signature artifact
    pub artifact: PathBuf,
    /// Whether the self-verification diagnostic reported a good signature
    pub signature_verified: bool,
    /// The timestamp query submitted to the TSA
    pub query: Option<PathBuf>,
    /// The TSA's raw response
    pub response: Option<PathBuf>,
    /// Whether the local timestamp verification succeeded
    pub timestamp_verified: bool,
}

/// Signs a document and timestamps the signature
///
/// Runs the full workflow against the given context. On the full success
/// path three new files exist in the signatures directory: the versioned
/// signature artifact, the timestamp query, and the timestamp response.
/// A self-verification mismatch or a failed local timestamp verification
/// is reported in error style but does not fail the run; the outcome
/// flags record what happened.
pub fn sign(context: &SignContext, document: &Path) -> Result<SignOutcome> {
    info!(
        "Signing file {}",
        highlight_message(&context.display_path(document))
    );

    match SigningStrategy::for_document(document)? {
        SigningStrategy::Clearsign => clearsign_document(context, document),
    }
}

fn clearsign_document(context: &SignContext, document: &Path) -> Result<SignOutcome> {
    info!(
        "Text file detected, so signing with {}.",
        warning_message("clearsign")
    );

    let document_name = document
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid_filename_error(document.to_path_buf()))?;

    // Step 1: resolve the next free version and the artifact path
    debug!("Resolving next signature version for {document_name}");
    let version = next_version(&context.sigs_dir, document_name)?;
    let artifact = artifact_path(&context.sigs_dir, document_name, version);

    // Step 2: sign
    debug!("Invoking gpg --clearsign");
    tools::clearsign(document, &artifact)?;
    info!(
        "Created signed file {}",
        highlight_message(&context.display_path(&artifact))
    );

    // Step 3: self-verify, so the operator sees the key and signing time.
    // A diagnostic without the success marker halts the timestamp steps but
    // is only reported: the signature artifact already exists and the run
    // still counts as completed.
    debug!("Verifying the freshly created signature");
    let verification = tools::verify_signature(&artifact)?;
    if tools::is_good_signature(&verification.stderr) {
        info!("{}", success_message(&verification.stderr));
    } else {
        error!("{}", error_message(&verification.stderr));
        return Ok(SignOutcome {
            artifact,
            signature_verified: false,
            query: None,
            response: None,
            timestamp_verified: false,
        });
    }

    info!("");

    // Step 4: create the timestamp query against the original document
    debug!("Creating timestamp query");
    let query = derived_path(&artifact, QUERY_SUFFIX);
    tools::create_timestamp_query(document, &query)?;
    info!(
        "Created timestamp query file {}",
        highlight_message(&context.display_path(&query))
    );

    // Step 5: submit the query and stream the response to disk
    debug!("Submitting timestamp query to {}", context.tsa_endpoint);
    let response = derived_path(&artifact, RESPONSE_SUFFIX);
    transport::submit_query(&context.tsa_endpoint, &query, &response)?;

    // The transport reported success, so an absent or empty response file
    // is an internal-consistency violation rather than a tool failure.
    let response_size = response.metadata().map(|m| m.len()).unwrap_or(0);
    if response_size == 0 {
        return Err(missing_artifact_error(response));
    }
    info!(
        "Received timestamp response {}",
        highlight_message(&context.display_path(&response))
    );

    // Step 6: verify the timestamp locally; failure here is non-fatal
    debug!("Verifying the timestamp response against the trust chain");
    let timestamp_verified = report_timestamp_verification(context, &response, &query)?;

    Ok(SignOutcome {
        artifact,
        signature_verified: true,
        query: Some(query),
        response: Some(response),
        timestamp_verified,
    })
}

/// Runs the local timestamp verification and reports its outcome
///
/// A non-zero exit only downgrades the result; the signature and the
/// authoritative server-side timestamp already exist at this point.
fn report_timestamp_verification(
    context: &SignContext,
    response: &Path,
    query: &Path,
) -> Result<bool> {
    let result = tools::verify_timestamp(&context.sigs_dir, response, query)?;

    if result.success() {
        info!("{}", success_message(&format!("openssl ts: {}", result.stdout)));
        Ok(true)
    } else {
        error!("{}", error_message(&result.stdout));
        error!("{}", error_message(&result.stderr));
        warn!("Timestamp verification failed; the signed artifacts are kept.");
        Ok(false)
    }
}

/// Appends an artifact suffix to a path, keeping the full filename
fn derived_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
