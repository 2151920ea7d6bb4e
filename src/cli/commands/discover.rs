//! Discover command implementation.
//!
//! The `shapebind discover` command runs one discovery pass and lists the
//! resulting bindings in registration order.

use serde::Serialize;

use crate::cli::args::DiscoverArgs;
use crate::error::Result;
use crate::render::RendererSet;
use crate::table::{ShapeBinding, ShapeTable};
use crate::ui::{Table, UserInterface};

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// One row of `discover` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRow {
    pub shape_type: String,
    pub feature: String,
    pub template: String,
    pub renderer: String,
}

impl BindingRow {
    fn new(binding: &ShapeBinding, renderers: &RendererSet) -> Self {
        let renderer = binding
            .binding_source
            .rsplit_once('.')
            .and_then(|(_, ext)| renderers.resolve(ext))
            .map(|r| r.name().to_string())
            .unwrap_or_default();

        Self {
            shape_type: binding.shape_type.clone(),
            feature: binding.feature_id().to_string(),
            template: binding.binding_source.clone(),
            renderer,
        }
    }
}

/// Binding rows for `table`, optionally limited to one feature.
pub fn binding_rows(
    table: &ShapeTable,
    renderers: &RendererSet,
    feature: Option<&str>,
) -> Vec<BindingRow> {
    table
        .bindings()
        .iter()
        .filter(|b| feature.is_none_or(|f| b.feature_id() == f))
        .map(|b| BindingRow::new(b, renderers))
        .collect()
}

/// The discover command implementation.
pub struct DiscoverCommand {
    context: ProjectContext,
    args: DiscoverArgs,
}

impl DiscoverCommand {
    /// Create a new discover command.
    pub fn new(context: ProjectContext, args: DiscoverArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DiscoverArgs {
        &self.args
    }
}

impl Command for DiscoverCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.context.load(ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let manager = self.context.manager(&config)?;
        let table = manager.refresh()?;
        let rows = binding_rows(
            &table,
            manager.engine().renderers(),
            self.args.feature.as_deref(),
        );

        if self.args.json {
            let json = serde_json::to_string_pretty(&rows).map_err(anyhow::Error::from)?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if rows.is_empty() {
            ui.warning("No shape bindings discovered");
            return Ok(CommandResult::success());
        }

        ui.show_header("Shape bindings");
        let mut out = Table::new(["Shape", "Feature", "Template", "Renderer"]);
        for row in &rows {
            out.add_row([
                row.shape_type.as_str(),
                row.feature.as_str(),
                row.template.as_str(),
                row.renderer.as_str(),
            ]);
        }
        ui.output(&out.render());

        ui.success(&format!(
            "Discovered {} bindings for {} shapes",
            rows.len(),
            table.descriptors().len()
        ));

        if ui.output_mode().shows_details() {
            let engine = manager.engine();
            let harvesters: Vec<&str> = engine.harvesters().iter().map(|h| h.name()).collect();
            let renderers: Vec<&str> = engine.renderers().iter().map(|r| r.name()).collect();
            ui.message(&format!("Harvesters: {}", harvesters.join(", ")));
            ui.message(&format!("Renderers: {}", renderers.join(", ")));
        }
        Ok(CommandResult::success())
    }
}
