// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! Validates the environment of a checkout and reports what is missing.

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tax_portal_env::ConfigBuilder;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "env-check",
    version,
    about = "Validate the tax portal environment configuration",
    long_about = None
)]
struct Cli {
    /// Directory holding the `.env` files.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Validate as client-delivered code, where secret variables are not required.
    #[arg(long)]
    client: bool,

    /// Print the public variables as JSON on success.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let env = match ConfigBuilder::new()
        .env_dir(&cli.dir)
        .secrets_reachable(!cli.client)
        .build()
    {
        Ok(env) => env,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if !cli.json {
        println!(
            "{} environment variables validated for {}",
            env.len(),
            env.tier()
        );
        return ExitCode::SUCCESS;
    }

    match serde_json::to_string_pretty(&env.public_json()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = err.to_string(), "failed to render public variables");
            ExitCode::FAILURE
        }
    }
}
