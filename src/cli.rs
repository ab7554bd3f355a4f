use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command, command, crate_description, crate_name, crate_version};

use crate::constants::{
    FILE_HELP, LOG_FILE_DEFAULT, LOG_FILE_HELP, SIGS_DIR_ENV, SIGS_DIR_HELP, VERBOSE_HELP,
};
use crate::errors::{Result, generic_error, path_operation_error};
use crate::logging::LogLevel;

/// Sets up and returns command-line argument matches
///
/// Defines the following surface:
/// - `--signatures-dir`: the directory holding artifacts and trust anchors
///   (also read from the environment)
/// - `sign FILE`: sign and timestamp the given document
/// - `verbose`: increase verbosity level
/// - `log_file`: mirror the log to a file
pub fn get_matches() -> ArgMatches {
    // define arg for the signatures directory, settable via the environment
    let arg_sigs_dir = Arg::new("signatures_dir")
        .short('s')
        .long("signatures-dir")
        .help(SIGS_DIR_HELP)
        .env(SIGS_DIR_ENV)
        .global(true)
        .value_parser(clap::value_parser!(PathBuf));

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .global(true)
        .action(clap::ArgAction::Count);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .global(true)
        .default_value(LOG_FILE_DEFAULT);

    let sign_command = Command::new("sign").about("Sign and timestamp a document").arg(
        Arg::new("file")
            .help(FILE_HELP)
            .required(true)
            .value_parser(clap::value_parser!(PathBuf)),
    );

    command!()
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_sigs_dir)
        .arg(arg_verbose)
        .arg(log_file)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(sign_command)
        .get_matches()
}

/// Gets the verbosity level from the command-line arguments
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

/// Gets the log file path from the command-line arguments
pub fn get_log_file(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("log_file")
        .cloned()
        .unwrap_or_else(|| LOG_FILE_DEFAULT.to_string())
}

/// Gets the signatures directory, resolved to an absolute path
///
/// # Errors
/// Returns an error if the directory does not exist, is not a directory,
/// or is not writable.
pub fn get_signatures_dir(matches: &ArgMatches) -> Result<PathBuf> {
    let dir = matches.get_one::<PathBuf>("signatures_dir").ok_or_else(|| {
        generic_error(&format!(
            "Signatures directory not set; pass --signatures-dir or set {SIGS_DIR_ENV}"
        ))
    })?;

    validate_signatures_dir(dir)?;

    dir.canonicalize()
        .map_err(|_| path_operation_error(dir.clone(), "resolve"))
}

/// Checks that the signatures directory exists and can hold new artifacts
fn validate_signatures_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(path_operation_error(
            dir.to_path_buf(),
            "use as signatures directory",
        ));
    }

    let metadata = dir
        .metadata()
        .map_err(|_| path_operation_error(dir.to_path_buf(), "inspect"))?;
    if metadata.permissions().readonly() {
        return Err(path_operation_error(
            dir.to_path_buf(),
            "write to signatures directory",
        ));
    }

    Ok(())
}

/// Gets the document path from the `sign` subcommand arguments
///
/// # Errors
/// Returns an error if the document does not exist or is not a regular file.
pub fn get_document_path(sign_matches: &ArgMatches) -> Result<PathBuf> {
    let file = sign_matches
        .get_one::<PathBuf>("file")
        .ok_or_else(|| generic_error("File argument not found"))?;

    if !file.is_file() {
        return Err(path_operation_error(file.clone(), "read"));
    }

    file.canonicalize()
        .map_err(|_| path_operation_error(file.clone(), "resolve"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_signatures_dir_missing() {
        let result = validate_signatures_dir(Path::new("/nonexistent/sigs"));
        assert!(result.is_err(), "Missing directory should be rejected");
    }

    #[test]
    fn test_validate_signatures_dir_existing() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_signatures_dir(dir.path());
        assert!(result.is_ok(), "Writable directory should be accepted");
    }
}
