//! Extensions command implementation.
//!
//! The `shapebind extensions` command lists the extensions discovery would
//! visit, in visiting order, without walking any directories.

use crate::cli::args::ExtensionsArgs;
use crate::error::Result;
use crate::table::ShapeTableBuilder;
use crate::ui::{Table, UserInterface};

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The extensions command implementation.
pub struct ExtensionsCommand {
    context: ProjectContext,
    args: ExtensionsArgs,
}

impl ExtensionsCommand {
    /// Create a new extensions command.
    pub fn new(context: ProjectContext, args: ExtensionsArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ExtensionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.context.load(ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let manager = self.context.manager(&config)?;
        let builder =
            ShapeTableBuilder::with_excluded_features(self.context.excluded_features(&config));
        let active = manager.engine().active_extensions(&builder)?;

        if self.args.json {
            let extensions: Vec<_> = active.iter().map(|e| e.as_ref()).collect();
            let json = serde_json::to_string_pretty(&extensions).map_err(anyhow::Error::from)?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if active.is_empty() {
            ui.warning("No active extensions");
            return Ok(CommandResult::success());
        }

        ui.show_header("Active extensions");
        let mut table = Table::new(["Extension", "Path", "Features"]);
        for ext in &active {
            let features: Vec<&str> = ext.features.iter().map(|f| f.id.as_str()).collect();
            table.add_row([ext.id.clone(), ext.sub_path.clone(), features.join(", ")]);
        }
        ui.output(&table.render());

        Ok(CommandResult::success())
    }
}
