//! Error types for shape discovery and rendering.
//!
//! This module defines [`ShapeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Discovery-time errors abort the whole pass; the previously published
//!   shape table stays authoritative.
//! - Render-time errors come from the renderer and reach the caller of the
//!   binding's factory unchanged.
//! - `anyhow::Error` (via `ShapeError::Other`) covers unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shape operations.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No registered renderer advertises a template file extension.
    #[error("No template renderer advertises a file extension; nothing can be discovered")]
    NoTemplateExtensions,

    /// A harvester declared a sub-path that cannot be resolved under an extension.
    #[error("Harvester '{harvester}' declares an unresolvable sub-path: '{sub_path}'")]
    InvalidSubPath { harvester: String, sub_path: String },

    /// The feature-state provider failed.
    #[error("Failed to read enabled features: {message}")]
    FeatureState { message: String },

    /// A harvester failed while inspecting a template file.
    #[error("Harvester '{harvester}' failed on {template}: {message}")]
    HarvesterFault {
        harvester: String,
        template: String,
        message: String,
    },

    /// Directory enumeration failed for a reason other than "not found".
    #[error("Failed to enumerate {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Requested shape type has no binding in the current table.
    #[error("Unknown shape: {shape_type}")]
    UnknownShape { shape_type: String },

    /// A renderer could not load, compile or render a template.
    #[error("Failed to render {template}: {message}")]
    Render { template: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShapeError {
    /// Whether this error is a setup problem rather than a runtime fault.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::NoTemplateExtensions
                | Self::InvalidSubPath { .. }
        )
    }
}

/// Result type alias for shape operations.
pub type Result<T> = std::result::Result<T, ShapeError>;
