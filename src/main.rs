use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use csa2sgf::Converter;
use csa2sgf::cli::{Cli, convert_all, expand_inputs};

/// Log filter variable, e.g. `CSA2SGF_LOG=debug`.
const LOG_ENV: &str = "CSA2SGF_LOG";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let converter = match Converter::new(cli.options()) {
        Ok(converter) => converter,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    let inputs = expand_inputs(&cli.files);
    if convert_all(&converter, &inputs) == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
