//! Shared helpers for binary-level tests: tool stubs on PATH and a
//! one-shot loopback Time-Stamp Authority.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

/// Write an executable shell script stub into `dir`
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();
}

/// Prefix the given directory to the current PATH
pub fn path_with(dir: &Path) -> String {
    let current = std::env::var("PATH").unwrap_or_default();
    format!("{}:{current}", dir.display())
}

/// gpg stub: clearsign copies the document, verify reports a good signature
pub const GPG_OK: &str = r#"#!/bin/sh
if [ "$1" = "--output" ]; then
    cp "$4" "$2"
    exit 0
fi
if [ "$1" = "--verify" ]; then
    echo 'gpg: Good signature from "Stub Signer <stub@example.org>"' >&2
    exit 0
fi
exit 1
"#;

/// gpg stub that fails to sign
pub const GPG_SIGN_FAILS: &str = r#"#!/bin/sh
echo 'gpg: signing failed: No secret key' >&2
exit 2
"#;

/// gpg stub whose verification diagnostic lacks the success marker
pub const GPG_BAD_SIGNATURE: &str = r#"#!/bin/sh
if [ "$1" = "--output" ]; then
    cp "$4" "$2"
    exit 0
fi
if [ "$1" = "--verify" ]; then
    echo 'gpg: BAD signature from "Stub Signer <stub@example.org>"' >&2
    exit 0
fi
exit 1
"#;

/// openssl stub: ts -query writes the query file, ts -verify succeeds
pub const OPENSSL_OK: &str = r#"#!/bin/sh
mode="$2"
if [ "$1" = "ts" ] && [ "$mode" = "-query" ]; then
    out=""
    while [ $# -gt 0 ]; do
        if [ "$1" = "-out" ]; then out="$2"; fi
        shift
    done
    printf 'stub-timestamp-query' > "$out"
    exit 0
fi
if [ "$1" = "ts" ] && [ "$mode" = "-verify" ]; then
    echo 'Verification: OK'
    exit 0
fi
exit 1
"#;

/// openssl stub: ts -query writes the query file, ts -verify reports a
/// trust-chain failure
pub const OPENSSL_VERIFY_FAILS: &str = r#"#!/bin/sh
mode="$2"
if [ "$1" = "ts" ] && [ "$mode" = "-query" ]; then
    out=""
    while [ $# -gt 0 ]; do
        if [ "$1" = "-out" ]; then out="$2"; fi
        shift
    done
    printf 'stub-timestamp-query' > "$out"
    exit 0
fi
if [ "$1" = "ts" ] && [ "$mode" = "-verify" ]; then
    echo 'Verification: FAILED'
    echo 'unable to get local issuer certificate' >&2
    exit 1
fi
exit 1
"#;

/// Whether a buffered HTTP request has been fully received
fn request_complete(buffer: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buffer);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };

    let content_length = text
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    buffer.len() >= header_end + 4 + content_length
}

/// Start a loopback TSA that answers exactly one request with `body`
///
/// Returns the endpoint URL to point the workflow at.
pub fn spawn_one_shot_tsa(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        while !request_complete(&buffer) {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            }
        }

        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/timestamp-reply\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(body);
    });

    format!("http://{addr}")
}
