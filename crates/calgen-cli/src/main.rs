//! calgen CLI entry point.

use clap::Parser;

use calgen_cli::cli::{Cli, Command};
use calgen_cli::commands;
use calgen_core::tracing::{TracingConfig, init_tracing};
use calgen_providers::google::{GoogleConfig, GoogleService};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    let config = GoogleConfig::new()
        .with_credentials_path(&cli.credentials_file)
        .with_token_path(&cli.token_file);
    let service = GoogleService::new(config);

    // Commands report their own failures; only clap's usage errors exit
    // non-zero.
    match cli.command {
        Command::Create(args) => commands::create::run(&args, &service).await,
        Command::FromSheet(args) => commands::sheet::run(&args, &service).await,
    }
}
