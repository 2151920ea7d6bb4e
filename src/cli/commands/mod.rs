//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands share configuration loading through
//! [`ProjectContext`].

pub mod context;
pub mod discover;
pub mod dispatcher;
pub mod extensions;
pub mod render;

pub use context::ProjectContext;
pub use discover::{binding_rows, BindingRow, DiscoverCommand};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use extensions::ExtensionsCommand;
pub use render::RenderCommand;
