/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// File extensions that are signed with gpg's clearsign mode
///
/// Any other extension is rejected before any artifact is created.
pub const CLEARSIGN_EXTENSIONS: [&str; 3] = ["md", "txt", "rst"];

/// Suffix of the clearsigned signature artifact
pub const SIGNATURE_SUFFIX: &str = "asc";

/// Suffix appended to the signature artifact name for the timestamp query
pub const QUERY_SUFFIX: &str = "apple.tsq";

/// Suffix appended to the signature artifact name for the timestamp response
pub const RESPONSE_SUFFIX: &str = "apple.tsr";

/// Width of the zero-padded version segment in signature artifact names
pub const VERSION_WIDTH: usize = 3;

/// Root certificate trust anchor expected inside the signatures directory
pub const ROOT_CERTIFICATE: &str = "AppleIncRootCertificate.pem";

/// Intermediate timestamp-authority certificate expected inside the
/// signatures directory
pub const TSA_CERTIFICATE: &str = "AppleTimestampCA.cer";

/// Default Time-Stamp Authority endpoint the query is submitted to
pub const TSA_ENDPOINT: &str = "http://timestamp.apple.com/ts01";

/// Environment variable overriding the Time-Stamp Authority endpoint
///
/// Lets an operator substitute an alternate TSA without touching the
/// sequencing logic.
pub const TSA_ENDPOINT_ENV: &str = "DOCSIGN_TSA_ENDPOINT";

/// Content type of an RFC 3161 timestamp query submission
pub const TSA_CONTENT_TYPE: &str = "application/timestamp-query";

/// Environment variable supplying the signatures directory
pub const SIGS_DIR_ENV: &str = "DOCSIGN_SIGS_DIR";

/// Help text for the signatures-dir command-line option
pub const SIGS_DIR_HELP: &str = "Directory holding signature artifacts and trust anchors";

/// Help text for the sign subcommand's file argument
pub const FILE_HELP: &str = "Document to sign and timestamp";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log-file command-line option
pub const LOG_FILE_HELP: &str = "Write the log to the given file as well as the console";

/// Default path for the log file (empty disables file logging)
pub const LOG_FILE_DEFAULT: &str = "";
