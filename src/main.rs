//! console-guard - admin console access control service

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use console_guard::config::Config;
use console_guard::server;
use console_guard::utils::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "console-guard", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CONSOLE_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

async fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args).await?;
    init_tracing(config.logging());

    if args.check {
        println!("Configuration OK");
        return Ok(());
    }

    let server = server::ServerBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("starting server")?;
    server.start().await.context("running server")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case
    let _ = dotenvy::dotenv();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
