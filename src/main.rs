// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use verbum::{run_build, BuildOptions};

mod cli;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("verbum=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build {
            manifest,
            output,
            dense_ratio,
        } => run_build(
            Path::new(&manifest),
            Path::new(&output),
            BuildOptions { dense_ratio },
        )
        .map(|_| ())
        .map_err(anyhow::Error::from),
        Commands::Inspect { dir } => cli::inspect::run_inspect(&dir),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
