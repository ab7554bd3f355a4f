pub use cli::*;
pub use errors::*;
pub use workflow::{SignContext, SignOutcome, SigningStrategy, sign};

pub mod cli;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod tools;
pub mod transport;
pub mod versioning;
pub mod workflow;

pub mod prelude {
    pub use crate::cli::{get_document_path, get_log_file, get_matches, get_signatures_dir, get_verbosity};
    pub use crate::errors::{
        Error, Result, file_operation_error, generic_error, invalid_filename_error,
        missing_artifact_error, path_operation_error, tool_failure_error, transport_error,
        unsupported_file_type_error,
    };
    pub use crate::logging::{LogLevel, format_message, init_default_logger, init_logger};
    pub use crate::workflow::{SignContext, SignOutcome, SigningStrategy, sign};
}
