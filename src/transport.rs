//! Time-Stamp Authority transport
//!
//! Submits the raw timestamp query bytes to the TSA over HTTP and streams
//! the response body straight to the response artifact. Blocking on
//! purpose; the whole workflow is a linear sequence.

use std::env;
use std::fs::File;
use std::path::Path;

use crate::constants::{TSA_CONTENT_TYPE, TSA_ENDPOINT, TSA_ENDPOINT_ENV};
use crate::errors::{Result, file_operation_error, transport_error};

/// The Time-Stamp Authority endpoint, honouring the environment override
pub fn tsa_endpoint() -> String {
    env::var(TSA_ENDPOINT_ENV).unwrap_or_else(|_| TSA_ENDPOINT.to_string())
}

/// POST the query file to the TSA and write the raw response to disk
///
/// The request body is the exact bytes of the query artifact with the
/// RFC 3161 content type. Any transport failure or non-success HTTP
/// status aborts the workflow; the response artifact is only written
/// from a successful reply.
pub fn submit_query(endpoint: &str, query: &Path, response: &Path) -> Result<()> {
    let body = std::fs::read(query)
        .map_err(|e| file_operation_error(e, query.to_path_buf(), "read"))?;

    let client = reqwest::blocking::Client::new();
    let mut reply = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, TSA_CONTENT_TYPE)
        .body(body)
        .send()
        .map_err(|e| transport_error(e, endpoint))?
        .error_for_status()
        .map_err(|e| transport_error(e, endpoint))?;

    let mut output = File::create(response)
        .map_err(|e| file_operation_error(e, response.to_path_buf(), "create"))?;
    reply
        .copy_to(&mut output)
        .map_err(|e| transport_error(e, endpoint))?;

    Ok(())
}
