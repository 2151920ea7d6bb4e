//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, DiscoverArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::discover::DiscoverCommand;
use super::extensions::ExtensionsCommand;
use super::render::RenderCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = ProjectContext::new(&self.project_root)
            .with_config(cli.config.clone())
            .with_exclude(cli.exclude.clone());

        match &cli.command {
            Some(Commands::Discover(args)) => DiscoverCommand::new(context, args.clone()).execute(ui),
            Some(Commands::Render(args)) => RenderCommand::new(context, args.clone()).execute(ui),
            Some(Commands::Extensions(args)) => {
                ExtensionsCommand::new(context, args.clone()).execute(ui)
            }
            None => DiscoverCommand::new(context, DiscoverArgs::default()).execute(ui),
        }
    }
}
