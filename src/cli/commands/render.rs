//! Render command implementation.
//!
//! The `shapebind render <shape>` command runs one discovery pass and
//! renders the shape through its effective (last registered) binding.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::cli::args::RenderArgs;
use crate::error::{Result, ShapeError};
use crate::render::DisplayContext;
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The render command implementation.
pub struct RenderCommand {
    context: ProjectContext,
    args: RenderArgs,
}

impl RenderCommand {
    /// Create a new render command.
    pub fn new(context: ProjectContext, args: RenderArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RenderArgs {
        &self.args
    }

    fn display_context(&self) -> Result<DisplayContext> {
        let model = match &self.args.model {
            Some(path) => read_model(&self.context.project_root().join(path))?,
            None => serde_json::Value::Object(Default::default()),
        };

        let ctx = DisplayContext::new(model);
        Ok(match &self.args.display_type {
            Some(display_type) => ctx.with_display_type(display_type),
            None => ctx,
        })
    }
}

fn read_model(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model {}", path.display()))?;
    let model = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in model {}", path.display()))?;
    Ok(model)
}

impl Command for RenderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.context.load(ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let ctx = self.display_context()?;
        let table = self.context.manager(&config)?.refresh()?;

        match table.render(&self.args.shape, &ctx) {
            Ok(html) => {
                ui.output(&html);
                Ok(CommandResult::success())
            }
            Err(ShapeError::UnknownShape { shape_type }) => {
                ui.error(&format!("Unknown shape: {}", shape_type));
                Ok(CommandResult::failure(2))
            }
            Err(e) => Err(e),
        }
    }
}
