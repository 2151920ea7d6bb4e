//! Extensions, features, and feature activation.
//!
//! An [`Extension`] is a deployable unit (module or theme) that owns a
//! sub-path of templates and contains one or more [`Feature`]s. The
//! [`FeatureStateProvider`] reports which features are currently enabled,
//! and [`FeatureActivationResolver`] turns that into the ordered, deduplicated
//! list of extensions whose templates discovery should visit.
//!
//! # Example
//!
//! ```
//! use shapebind::extension::{Extension, FeatureActivationResolver, StaticFeatureProvider};
//! use std::collections::HashSet;
//!
//! let blog = Extension::new("Blog", "Blog", &["Blog", "Blog.Comments"]);
//! let provider = StaticFeatureProvider::new(vec![blog], &["Blog", "Blog.Comments"]);
//!
//! let resolver = FeatureActivationResolver::new(&provider);
//! let active = resolver.active_extensions(&HashSet::new()).unwrap();
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].id, "Blog");
//! ```

pub mod provider;
pub mod resolver;
pub mod types;

pub use provider::{FeatureStateProvider, StaticFeatureProvider};
pub use resolver::FeatureActivationResolver;
pub use types::{EnabledFeature, Extension, Feature};
