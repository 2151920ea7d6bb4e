//! Configuration loading, parsing, and validation for shapebind.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Building discovery components in [`runtime`]
//!
//! # Example
//!
//! ```
//! use shapebind::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".shapebind");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("config.yml"),
//!     "extensions:\n  - id: Blog\nfeatures:\n  enabled: [Blog]\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.extensions[0].id, "Blog");
//! ```
//!
//! # Configuration File Locations
//!
//! shapebind discovers and merges configuration in this order:
//! 1. User global config (`~/.shapebind/config.yml`)
//! 2. Project config (`.shapebind/config.yml`)
//! 3. Local overrides (`.shapebind/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod runtime;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use runtime::{build_engine, build_harvesters, build_manager, build_renderers, content_root};
pub use schema::{ExtensionConfig, FeaturesConfig, Settings, ShapesConfig};
pub use validator::{validate, validate_config, ValidationError};
