//! This module defines the command-line interface for the application using `clap`.
//!
//! It provides a `Cli` struct that represents the parsed command-line arguments,
//! and a `Commands` enum that represents the available subcommands and their
//! options.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use awful_recipes::commands::{Cli, Commands};
//!
//! let cli = Cli::parse();
//! match cli.command {
//!     Commands::Ask { query, k } => println!("{query} (top {k:?})"),
//!     _ => {}
//! }
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Represents the parsed command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, propagate_version = true, color = clap::ColorChoice::Always)]
pub struct Cli {
    /// Path to `config.yaml`. Defaults to the per-platform config directory.
    #[arg(long, global = true, env = "RECIPES_CONFIG")]
    pub config: Option<PathBuf>,

    /// The parsed subcommand and its options.
    #[command(subcommand)]
    pub command: Commands,
}

/// Represents the available subcommands and their options.
#[derive(Subcommand, Debug)]
#[command(about, long_about = None, color = clap::ColorChoice::Always)]
pub enum Commands {
    /// Write a default `config.yaml` and create the data directory.
    Init,

    /// Start an interactive chat.
    ///
    /// Type a dish name or a question; `/ingredients` and `/steps` press the two
    /// menu buttons; `exit` quits.
    #[clap(name = "chat", alias = "i")]
    Chat {
        /// Write the transcript as an HTML page to this path on exit.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// One-shot retrieval: print the closest recipe titles and their distances.
    #[clap(name = "ask", alias = "a")]
    Ask {
        /// Free-text recipe query.
        query: String,

        /// Number of candidates to request. Defaults to `search_top_k` from the config.
        #[arg(short = 'k')]
        k: Option<usize>,
    },

    /// Embed the corpus and write the search index and its manifest.
    #[clap(name = "build-index")]
    BuildIndex,
}
