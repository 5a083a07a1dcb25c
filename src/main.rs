//
//  scribe-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scribe_cli::cli::{Cli, Commands};
use scribe_cli::{exit_code_for, exit_codes};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Logs go to stderr; `SCRIBE_DEBUG=debug` shows every retry and cascade step.
fn init_logging() {
    let filter = EnvFilter::try_from_env("SCRIBE_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::FormFill(cmd) => cmd.run(&cli.global).await,
        Commands::Profile(cmd) => cmd.run(&cli.global).await,
        Commands::Ocr(cmd) => cmd.run(&cli.global).await,
        Commands::Transcription(cmd) => cmd.run(&cli.global).await,
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", scribe_cli::APP_NAME, scribe_cli::VERSION);
            Ok(())
        }
    }
}
