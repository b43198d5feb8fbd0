// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the verbum command-line interface.
//!
//! Two subcommands: `build` to index a corpus described by a manifest, and
//! `inspect` to summarize and sanity-check the artifacts a build wrote.

pub mod display;
pub mod inspect;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verbum",
    about = "Positional index builder for a Latin text corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build corpus artifacts from a manifest of work files
    Build {
        /// Path to manifest.json (lists work files and the analysis table)
        #[arg(short, long)]
        manifest: String,

        /// Output directory for corpus artifacts
        #[arg(short, long)]
        output: String,

        /// A posting list is stored as a bitmask once len * ratio > tokens
        #[arg(long, default_value_t = verbum::binary::DEFAULT_DENSE_RATIO)]
        dense_ratio: u32,
    },

    /// Inspect the artifacts in a corpus directory
    Inspect {
        /// Corpus output directory
        dir: String,
    },
}
