//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// fixture-mangler - Replace secrets in encrypted YAML fixtures with fake values.
#[derive(Debug, Parser)]
#[command(name = "fixture-mangler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .fixture-mangler.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mangle secrets in encrypted files (default if no command specified)
    Run(RunArgs),

    /// List files that would be processed
    List(ListArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options that change how `sops` is invoked.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SopsArgs {
    /// Age key file passed to sops
    #[arg(long, env = "SOPS_AGE_KEY_FILE")]
    pub age_key_file: Option<PathBuf>,

    /// sops program to invoke
    #[arg(long = "sops", env = "FIXTURE_MANGLER_SOPS")]
    pub sops_binary: Option<String>,
}

impl SopsArgs {
    /// Read the same values clap would take from the environment, for the
    /// default command where no arguments were parsed.
    pub fn from_env() -> Self {
        Self {
            age_key_file: std::env::var_os("SOPS_AGE_KEY_FILE").map(PathBuf::from),
            sops_binary: std::env::var("FIXTURE_MANGLER_SOPS").ok(),
        }
    }

    /// Convert to config overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sops_binary: self.sops_binary.clone(),
            age_key_file: self.age_key_file.clone(),
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub sops: SopsArgs,

    /// Print mangled plaintext instead of rewriting files
    #[arg(long)]
    pub dry_run: bool,

    /// Process only these files instead of searching the project
    pub files: Vec<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print absolute paths instead of paths relative to the project root
    #[arg(long)]
    pub absolute: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub sops: SopsArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
