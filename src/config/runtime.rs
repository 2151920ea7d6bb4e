//! Construction of discovery components from configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::ShapesConfig;
use crate::discovery::DiscoveryEngine;
use crate::error::{Result, ShapeError};
use crate::extension::StaticFeatureProvider;
use crate::files::PhysicalFileProvider;
use crate::harvest::HarvesterSet;
use crate::render::RendererSet;
use crate::table::ShapeTableManager;

/// Content root for `config`, resolved against `project_root` when relative.
pub fn content_root(config: &ShapesConfig, project_root: &Path) -> PathBuf {
    let root = &config.settings.content_root;
    if root.is_absolute() {
        root.clone()
    } else {
        project_root.join(root)
    }
}

/// Harvesters named in settings, in order.
pub fn build_harvesters(config: &ShapesConfig) -> Result<HarvesterSet> {
    let mut set = HarvesterSet::new();
    for name in &config.settings.harvesters {
        let harvester =
            HarvesterSet::builtin(name).ok_or_else(|| ShapeError::ConfigValidationError {
                message: format!("Unknown harvester '{}'", name),
            })?;
        set.register(harvester);
    }
    Ok(set)
}

/// Renderers named in settings, in order.
pub fn build_renderers(config: &ShapesConfig) -> Result<RendererSet> {
    let mut set = RendererSet::new();
    for name in &config.settings.renderers {
        let renderer =
            RendererSet::builtin(name).ok_or_else(|| ShapeError::ConfigValidationError {
                message: format!("Unknown renderer '{}'", name),
            })?;
        set.register(renderer);
    }
    Ok(set)
}

/// Build a discovery engine over the configured catalog and content root.
pub fn build_engine(config: &ShapesConfig, project_root: &Path) -> Result<DiscoveryEngine> {
    let features = StaticFeatureProvider::with_enabled_ids(
        config.extension_catalog(),
        config.features.enabled.clone(),
    );

    Ok(DiscoveryEngine::new(
        build_harvesters(config)?,
        build_renderers(config)?,
        Arc::new(features),
        Arc::new(PhysicalFileProvider::new(content_root(config, project_root))),
    ))
}

/// Build a table manager; `extra_excluded` adds to the configured exclusions.
pub fn build_manager(
    config: &ShapesConfig,
    project_root: &Path,
    extra_excluded: &[String],
) -> Result<ShapeTableManager> {
    let engine = build_engine(config, project_root)?;
    let excluded = config
        .features
        .excluded
        .iter()
        .chain(extra_excluded)
        .cloned();

    Ok(ShapeTableManager::new(engine, excluded)
        .with_monitoring(!config.settings.disable_monitoring)
        .with_check_interval(Duration::from_millis(config.settings.monitor_interval_ms)))
}
