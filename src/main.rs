use std::process::ExitCode;

use log::error;

use doc_sign::cli::{get_document_path, get_log_file, get_matches, get_signatures_dir, get_verbosity};
use doc_sign::logging::init_logger;
use doc_sign::workflow::{SignContext, sign};

fn main() -> ExitCode {
    let matches = get_matches();

    if let Err(e) = init_logger(get_verbosity(&matches), &get_log_file(&matches)) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let result = match matches.subcommand() {
        Some(("sign", sign_matches)) => get_signatures_dir(&matches)
            .map(SignContext::new)
            .and_then(|context| {
                let document = get_document_path(sign_matches)?;
                sign(&context, &document).map(|_| ())
            }),
        _ => unreachable!("subcommand is required"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Surface the failing tool's own error output verbatim
            if let doc_sign::errors::Error::ToolFailure { stderr, .. } = &e {
                if !stderr.is_empty() {
                    error!("{}", stderr.trim_end());
                }
            }
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
