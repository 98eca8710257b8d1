//! CLI definition and command handling

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use harpack_core::Result;

use commands::{ArchiveCommand, VersionCommand};

/// harpack - SDK release packaging CLI
#[derive(Debug, Parser)]
#[command(name = "harpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build, package, and archive the SDK
    Archive(ArchiveCommand),

    /// Print the resolved release version
    Version(VersionCommand),
}

impl Cli {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        let root = self.project_root()?;

        match &self.command {
            Commands::Archive(cmd) => cmd.execute(&root),
            Commands::Version(cmd) => cmd.execute(&root),
        }
    }

    fn project_root(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(Into::into),
        }
    }
}
