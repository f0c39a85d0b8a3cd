//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gitprep`.
#[derive(Debug, Parser)]
#[command(name = "gitprep", version, about = "Generate READMEs and deploy projects to GitHub")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive setup for GitHub credentials and the text provider.
    Setup,
    /// Re-run the interactive setup.
    Reconfigure,
    /// Analyze a project and generate its README.md.
    Readme {
        /// Project path to analyze.
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// README type: simple, advanced, or installation.
        #[arg(long = "type", value_name = "TYPE", default_value = "advanced")]
        doc_type: String,
    },
    /// Create a .gitignore tailored to the project's language.
    Gitignore {
        /// Project path to analyze.
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Analyze, generate README and .gitignore, and deploy to GitHub.
    Run {
        /// Project path to analyze.
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// README type: simple, advanced, or installation.
        #[arg(long = "type", value_name = "TYPE", default_value = "advanced")]
        doc_type: String,
    },
}
