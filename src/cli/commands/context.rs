//! Configuration and discovery setup shared by commands.

use std::path::{Path, PathBuf};

use crate::config::{build_manager, load_config, validate, ShapesConfig};
use crate::error::{Result, ShapeError};
use crate::table::ShapeTableManager;
use crate::ui::UserInterface;

/// Where a command finds its configuration and what it excludes.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    exclude: Vec<String>,
}

impl ProjectContext {
    /// Create a context for the given project root.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            exclude: Vec::new(),
        }
    }

    /// Load this config file instead of the merged project layers.
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config_override = config;
        self
    }

    /// Exclude these feature ids in addition to the configured ones.
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Feature ids excluded on the command line.
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Load and validate configuration.
    ///
    /// Returns `Ok(None)` after reporting to `ui` when no configuration exists.
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<Option<ShapesConfig>> {
        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(config) => config,
            Err(ShapeError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        validate(&config)?;
        Ok(Some(config))
    }

    /// Build a table manager for `config`.
    ///
    /// Monitoring is off since a command runs a single pass.
    pub fn manager(&self, config: &ShapesConfig) -> Result<ShapeTableManager> {
        Ok(build_manager(config, &self.project_root, &self.exclude)?.with_monitoring(false))
    }

    /// Every excluded feature id, configured and command-line.
    pub fn excluded_features(&self, config: &ShapesConfig) -> Vec<String> {
        config
            .features
            .excluded
            .iter()
            .chain(&self.exclude)
            .cloned()
            .collect()
    }
}
