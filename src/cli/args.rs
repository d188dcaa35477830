//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::DisplayStyle;

/// Arena-backed trees and their boxed text-art format
#[derive(Parser, Debug)]
#[command(name = "treebox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Explicit config file (overrides the global one)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-encode a tree into canonical form
    Fmt {
        /// Tree file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: String,
        /// Print a status line instead of the tree; fail if the input is not canonical
        #[arg(long)]
        check: bool,
    },

    /// Render a tree
    Show {
        /// Tree file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: String,
        /// Rendering style (default from settings)
        #[arg(short, long, value_enum)]
        style: Option<DisplayStyle>,
    },

    /// Print node count, depth and leaf count
    Stats {
        /// Tree file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: String,
    },

    /// Print the nodes between two labels
    Path {
        /// Tree file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: String,
        /// Label of the start node (first pre-order match)
        from: String,
        /// Label of the end node (first pre-order match)
        to: String,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
