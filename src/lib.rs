//! shapebind - Shape template discovery and binding.
//!
//! shapebind walks the template directories of every active extension,
//! asks a set of harvesters which shapes each template file renders, and
//! binds the results into a queryable [`table::ShapeTable`]. The table is
//! rebuilt when content changes and published atomically.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`discovery`] - The discovery pass
//! - [`error`] - Error types and result aliases
//! - [`extension`] - Extensions, features, and feature activation
//! - [`files`] - File providers for template directories
//! - [`harvest`] - Harvesters that map file names to shapes
//! - [`render`] - Template renderers
//! - [`table`] - Shape tables and their publication
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::fs;
//! use std::sync::Arc;
//!
//! use shapebind::discovery::DiscoveryEngine;
//! use shapebind::extension::{Extension, StaticFeatureProvider};
//! use shapebind::files::PhysicalFileProvider;
//! use shapebind::harvest::HarvesterSet;
//! use shapebind::render::{DisplayContext, RendererSet};
//! use shapebind::table::ShapeTableBuilder;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join("Blog/Views")).unwrap();
//! fs::write(temp.path().join("Blog/Views/Post.html"), "<p>post</p>").unwrap();
//!
//! let blog = Extension::new("Blog", "Blog", &["Blog"]);
//! let engine = DiscoveryEngine::new(
//!     HarvesterSet::with_builtins(),
//!     RendererSet::with_builtins(),
//!     Arc::new(StaticFeatureProvider::new(vec![blog], &["Blog"])),
//!     Arc::new(PhysicalFileProvider::new(temp.path())),
//! );
//!
//! let mut builder = ShapeTableBuilder::new();
//! engine.discover(&mut builder).unwrap();
//! let table = builder.build();
//!
//! let html = table.render("Post", &DisplayContext::default()).unwrap();
//! assert_eq!(html, "<p>post</p>");
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod files;
pub mod harvest;
pub mod render;
pub mod table;
pub mod ui;

pub use error::{Result, ShapeError};
