//! smtp2http: forward a mail read from stdin to an HTTP endpoint.
//!
//! This is the main entry point. It parses arguments, runs the relay
//! pipeline, and maps the outcome to the exit code the MTA expects.

use clap::Parser;
use smtp2http::cli::Cli;
use smtp2http::error::{RelayError, Result};
use smtp2http::relay::{self, Outcome};
use smtp2http::{exit_codes, logging};
use std::io::Read;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                exit_codes::USAGE
            } else {
                exit_codes::SUCCESS
            };
            return ExitCode::from(code as u8);
        }
    };

    logging::init(cli.verbose);

    match run(&cli) {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            match err {
                RelayError::TooLarge { .. } => warn!("{}", err),
                RelayError::Lock(ref e) if e.is_temporary() => {
                    info!("serialization timeout occurred, message will be requeued")
                }
                _ => error!("{}", err),
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = cli.resolve_config()?;

    let mut mail = Vec::new();
    std::io::stdin()
        .read_to_end(&mut mail)
        .map_err(|e| RelayError::Input(e.to_string()))?;

    relay::relay(&cli.url, &mail, &config)
}
