//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::incident::DEFAULT_DEDUP_WINDOW_MINUTES;
use crate::synth::DEFAULT_OUTDIR;

/// devops-agent - Deployment entry point and incident processing for the
/// autonomous DevOps incident responder.
#[derive(Debug, Parser)]
#[command(name = "devops-agent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (twice: errors and machine-readable output only)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

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
    /// Synthesize the deployment stack (default if no command specified)
    Synth(SynthArgs),

    /// Show the resolved deployment environment
    Config(ConfigArgs),

    /// Deduplicate an alarm event and forward new incidents
    Dedup(DedupArgs),

    /// Process a forwarded incident event
    Handle(HandleArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `synth` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SynthArgs {
    /// Context value (KEY=VALUE), may be repeated
    #[arg(short, long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Directory to write the cloud assembly to
    #[arg(short, long, default_value = DEFAULT_OUTDIR)]
    pub output: PathBuf,

    /// Render the assembly without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the manifest as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for SynthArgs {
    fn default() -> Self {
        Self {
            context: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTDIR),
            dry_run: false,
            json: false,
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Context value (KEY=VALUE), may be repeated
    #[arg(short, long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Output as JSON
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML
    #[arg(long)]
    pub yaml: bool,
}

/// Arguments for the `dedup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DedupArgs {
    /// Alarm event JSON file
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,

    /// Incident store (defaults to .devops-agent/incidents.jsonl)
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Event outbox (defaults to .devops-agent/events.jsonl)
    #[arg(long, value_name = "FILE")]
    pub outbox: Option<PathBuf>,

    /// Duplicate suppression window
    #[arg(
        long,
        default_value_t = DEFAULT_DEDUP_WINDOW_MINUTES,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub window_minutes: i64,
}

/// Arguments for the `handle` command.
#[derive(Debug, Clone, clap::Args)]
pub struct HandleArgs {
    /// New-incident event JSON file
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,

    /// Incident store (defaults to .devops-agent/incidents.jsonl)
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Context archive directory (defaults to .devops-agent/archive)
    #[arg(long, value_name = "DIR")]
    pub archive: Option<PathBuf>,

    /// Log file to scan for recent errors
    #[arg(long, value_name = "FILE")]
    pub logs: Option<PathBuf>,

    /// Shell command that receives the analysis prompt on stdin
    #[arg(long, value_name = "COMMAND", env = "DEVOPS_AGENT_COMMAND")]
    pub agent_command: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
