use glob::PatternError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the Doc Sign application
#[derive(Debug)]
pub enum Error {
    /// Error when the input document has an extension with no signing strategy
    UnsupportedFileType { path: PathBuf, extension: String },
    /// Error when an external tool exits with a non-zero status
    ToolFailure {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },
    /// Error when an expected artifact is missing or empty after a
    /// reported-successful step
    MissingArtifact { path: PathBuf },
    /// Error related to the Time-Stamp Authority transport
    Transport {
        source: reqwest::Error,
        url: String,
    },
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error related to path operations
    PathOperation { path: PathBuf, operation: String },
    /// Error when a filename is not valid Unicode
    InvalidFilename { path: PathBuf },
    /// Error related to glob pattern matching
    GlobPattern {
        source: PatternError,
        pattern: String,
    },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFileType { path, extension } => {
                write!(
                    f,
                    "Unsupported file type '.{extension}': {}",
                    path.display()
                )
            }
            Error::ToolFailure { tool, status, .. } => match status {
                Some(code) => write!(f, "{tool} exited with status {code}"),
                None => write!(f, "{tool} was terminated by a signal"),
            },
            Error::MissingArtifact { path } => {
                write!(
                    f,
                    "Expected artifact is missing or empty: {}",
                    path.display()
                )
            }
            Error::Transport { url, .. } => {
                write!(f, "Failed to submit timestamp query to {url}")
            }
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::PathOperation { path, operation } => {
                write!(f, "Failed to {} path: {}", operation, path.display())
            }
            Error::InvalidFilename { path } => {
                write!(f, "Filename is not valid unicode: {}", path.display())
            }
            Error::GlobPattern { pattern, .. } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Transport { source, .. } => Some(source),
            Error::FileOperation { source, .. } => Some(source),
            Error::GlobPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::FileOperation {
            source: err,
            path: PathBuf::new(),
            operation: "perform operation on".to_string(),
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Error::GlobPattern {
            source: err,
            pattern: String::new(),
        }
    }
}

/// Custom Result type for the Doc Sign application
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an unsupported file type error
pub fn unsupported_file_type_error(path: PathBuf, extension: &str) -> Error {
    Error::UnsupportedFileType {
        path,
        extension: extension.to_string(),
    }
}

/// Helper function to create a tool failure error
pub fn tool_failure_error(tool: &str, status: Option<i32>, stderr: &str) -> Error {
    Error::ToolFailure {
        tool: tool.to_string(),
        status,
        stderr: stderr.to_string(),
    }
}

/// Helper function to create a missing artifact error
pub fn missing_artifact_error(path: PathBuf) -> Error {
    Error::MissingArtifact { path }
}

/// Helper function to create a transport error
pub fn transport_error(err: reqwest::Error, url: &str) -> Error {
    Error::Transport {
        source: err,
        url: url.to_string(),
    }
}

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a path operation error
pub fn path_operation_error(path: PathBuf, operation: &str) -> Error {
    Error::PathOperation {
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create an invalid filename error
pub fn invalid_filename_error(path: PathBuf) -> Error {
    Error::InvalidFilename { path }
}

/// Helper function to create a glob pattern error
pub fn glob_pattern_error(err: PatternError, pattern: &str) -> Error {
    Error::GlobPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_file_type_error() {
        let path = PathBuf::from("/vault/report.pdf");
        let error = unsupported_file_type_error(path, "pdf");

        let error_string = format!("{error}");
        assert!(
            error_string.contains(".pdf"),
            "Error message should contain the extension"
        );
        assert!(
            error_string.contains("/vault/report.pdf"),
            "Error message should contain the path"
        );
    }

    #[test]
    fn test_tool_failure_error() {
        let error = tool_failure_error("gpg", Some(2), "gpg: signing failed");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("gpg"),
            "Error message should contain the tool name"
        );
        assert!(
            error_string.contains('2'),
            "Error message should contain the exit status"
        );

        // A signal-terminated process has no exit code
        let error = tool_failure_error("openssl", None, "");
        let error_string = format!("{error}");
        assert!(
            error_string.contains("signal"),
            "Error message should mention signal termination"
        );
    }

    #[test]
    fn test_missing_artifact_error() {
        let path = PathBuf::from("/sigs/notes.md.000.asc.apple.tsr");
        let error = missing_artifact_error(path.clone());

        let error_string = format!("{error}");
        assert!(
            error_string.contains("missing or empty"),
            "Error message should describe the consistency violation"
        );
        assert!(
            error_string.contains("notes.md.000.asc.apple.tsr"),
            "Error message should contain the path"
        );
    }

    #[test]
    fn test_file_operation_error() {
        let path = PathBuf::from("/test/path");
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = file_operation_error(io_error, path.clone(), "read");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("read"),
            "Error message should contain the operation"
        );
        assert!(
            error_string.contains("/test/path"),
            "Error message should contain the path"
        );
    }

    #[test]
    fn test_path_operation_error() {
        let path = PathBuf::from("/test/path");
        let error = path_operation_error(path.clone(), "resolve");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("resolve"),
            "Error message should contain the operation"
        );
    }

    #[test]
    fn test_invalid_filename_error() {
        let path = PathBuf::from("/test/invalid:file");
        let error = invalid_filename_error(path.clone());

        let error_string = format!("{error}");
        assert!(
            error_string.contains("/test/invalid:file"),
            "Error message should contain the path"
        );
    }

    #[test]
    fn test_glob_pattern_error() {
        let result = glob::Pattern::new("[");
        let pattern_error = result.err().unwrap();
        let error = glob_pattern_error(pattern_error, "test-glob-pattern");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("test-glob-pattern"),
            "Error message should contain the pattern"
        );
    }

    #[test]
    fn test_generic_error() {
        let error = generic_error("Something went wrong");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("Something went wrong"),
            "Error message should contain the message"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        let error_string = format!("{error}");
        assert!(
            error_string.contains("Failed to perform operation on file"),
            "Error message should contain the underlying error"
        );

        let result = glob::Pattern::new("[");
        let pattern_error = result.err().unwrap();
        let error: Error = pattern_error.into();

        let error_string = format!("{error}");
        assert!(
            error_string.contains("Invalid glob pattern"),
            "Error message should contain the underlying error"
        );
    }
}
