//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shapebind - Discover shape templates and bind them to shape types.
#[derive(Debug, Parser)]
#[command(name = "shapebind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .shapebind/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Exclude features from discovery (comma-separated ids)
    #[arg(long, global = true, value_delimiter = ',')]
    pub exclude: Vec<String>,

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
    /// Run discovery and list bindings (default if no command specified)
    Discover(DiscoverArgs),

    /// Render a shape through its effective binding
    Render(RenderArgs),

    /// List the active extensions and their features
    Extensions(ExtensionsArgs),
}

/// Arguments for the `discover` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DiscoverArgs {
    /// Only show bindings for this feature
    #[arg(short, long)]
    pub feature: Option<String>,

    /// Print bindings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RenderArgs {
    /// Shape type to render (case-insensitive)
    pub shape: String,

    /// JSON file used as the display model
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Display type passed to the template
    #[arg(short, long)]
    pub display_type: Option<String>,
}

/// Arguments for the `extensions` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExtensionsArgs {
    /// Print extensions as JSON
    #[arg(long)]
    pub json: bool,
}
