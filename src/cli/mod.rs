//! Command-line interface for shapebind.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DiscoverArgs, ExtensionsArgs, RenderArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ProjectContext};
