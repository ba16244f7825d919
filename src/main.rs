use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use flowset::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so --json output on stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "flowset=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
