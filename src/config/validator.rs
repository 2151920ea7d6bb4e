//! Configuration validation rules.
//!
//! - Extension and feature ids are well-formed and unique
//! - Extension paths stay inside the content root
//! - Enabled and excluded features reference declared features
//! - Harvester and renderer names are known, with at least one renderer

use crate::config::schema::ShapesConfig;
use crate::error::{Result, ShapeError};
use crate::harvest::HarvesterSet;
use crate::render::RendererSet;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Extension and feature identifiers.
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("ID_REGEX must compile"));

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Extension id if the error is extension-specific
    pub extension: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            extension: None,
        }
    }

    fn for_extension(rule: &str, extension: &str, message: String) -> Self {
        Self {
            extension: Some(extension.to_string()),
            ..Self::new(rule, message)
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ShapesConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_extensions(config));
    errors.extend(validate_features(config));
    errors.extend(validate_settings(config));

    errors
}

fn validate_extensions(config: &ShapesConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut extension_ids = HashSet::new();
    let mut feature_ids = HashSet::new();

    for ext in &config.extensions {
        if !ID_REGEX.is_match(&ext.id) {
            errors.push(ValidationError::for_extension(
                "invalid-id",
                &ext.id,
                format!("Extension id '{}' is not a valid identifier", ext.id),
            ));
        }

        if !extension_ids.insert(ext.id.as_str()) {
            errors.push(ValidationError::for_extension(
                "duplicate-extension",
                &ext.id,
                format!("Extension '{}' is declared more than once", ext.id),
            ));
        }

        if !is_relative_path(ext.sub_path()) {
            errors.push(ValidationError::for_extension(
                "invalid-path",
                &ext.id,
                format!(
                    "Extension '{}' path '{}' must be relative to the content root",
                    ext.id,
                    ext.sub_path()
                ),
            ));
        }

        for feature in ext.feature_ids() {
            if !ID_REGEX.is_match(feature) {
                errors.push(ValidationError::for_extension(
                    "invalid-id",
                    &ext.id,
                    format!("Feature id '{}' is not a valid identifier", feature),
                ));
            }
            if !feature_ids.insert(feature) {
                errors.push(ValidationError::for_extension(
                    "duplicate-feature",
                    &ext.id,
                    format!("Feature '{}' is declared by more than one extension", feature),
                ));
            }
        }
    }

    errors
}

fn validate_features(config: &ShapesConfig) -> Vec<ValidationError> {
    let declared: HashSet<&str> = config
        .extensions
        .iter()
        .flat_map(|ext| ext.feature_ids())
        .collect();

    let mut errors = Vec::new();

    for id in &config.features.enabled {
        if !declared.contains(id.as_str()) {
            errors.push(ValidationError::new(
                "unknown-feature",
                format!("Enabled feature '{}' is not declared by any extension", id),
            ));
        }
    }

    for id in &config.features.excluded {
        if !declared.contains(id.as_str()) {
            errors.push(ValidationError::new(
                "unknown-feature",
                format!("Excluded feature '{}' is not declared by any extension", id),
            ));
        }
    }

    errors
}

fn validate_settings(config: &ShapesConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let settings = &config.settings;

    for name in &settings.harvesters {
        if HarvesterSet::builtin(name).is_none() {
            errors.push(ValidationError::new(
                "unknown-harvester",
                format!(
                    "Unknown harvester '{}' (expected one of: {})",
                    name,
                    HarvesterSet::builtin_names().join(", ")
                ),
            ));
        }
    }

    for name in &settings.renderers {
        if RendererSet::builtin(name).is_none() {
            errors.push(ValidationError::new(
                "unknown-renderer",
                format!(
                    "Unknown renderer '{}' (expected one of: {})",
                    name,
                    RendererSet::builtin_names().join(", ")
                ),
            ));
        }
    }

    if settings.renderers.is_empty() {
        errors.push(ValidationError::new(
            "no-renderers",
            "At least one renderer must be configured".to_string(),
        ));
    }

    errors
}

fn is_relative_path(path: &str) -> bool {
    let normalized = path.replace('\\', "/");
    !normalized.trim().is_empty()
        && !normalized.starts_with('/')
        && !normalized.contains(':')
        && !normalized.split('/').any(|segment| segment == "..")
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every failed rule.
pub fn validate(config: &ShapesConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ShapeError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
