//! Binary entry point

use clap::Parser;
use std::process::ExitCode;

use super::cli::args::Args;
use super::cli::render::render;
use crate::client::api::GtmResult;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;

/// Parse arguments, start logging and print the requested output
pub fn startup() -> ExitCode {
    let args = Args::parse();
    let use_color = args.use_color();
    colored::control::set_override(use_color);

    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return ExitCode::FAILURE;
    }
    log::debug!("gtmkit {} starting", crate::core::version::long_version());

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error_with_context(&e, "Rendering GTM snippet");
            ExitCode::FAILURE
        }
    }
}

/// Everything after logging is up: load configuration and render
pub fn run(args: &Args) -> GtmResult<String> {
    let config = args.client_config()?;
    render(args.command, &config, args.use_color())
}
