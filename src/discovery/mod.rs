//! Shape template discovery.
//!
//! [`DiscoveryEngine`] walks every active extension's harvester sub-paths,
//! keeps files whose extension some renderer advertises, runs every
//! harvester over every kept file, and registers one binding per
//! (shape hit, feature of the extension).
//!
//! # Pipeline
//!
//! 1. Feature activation: enabled features minus exclusions, reduced to
//!    distinct extensions ([`crate::extension::FeatureActivationResolver`]).
//! 2. [`ExtensionContext`] -> [`PathContext`]s: one per distinct harvester
//!    sub-path, holding the matched files (empty when the directory is missing).
//! 3. [`FileContext`]: a [`crate::harvest::HarvestInfo`] plus the renderer
//!    that owns the file's extension.
//! 4. [`ShapeContext`]: one per harvester hit.
//! 5. Registration: only after every stage succeeded for every extension,
//!    so a failing pass leaves the builder untouched.
//!
//! Every harvester sees every file, whichever harvester's sub-path the
//! file was found under.

pub mod engine;
pub mod stages;

pub use engine::DiscoveryEngine;
pub use stages::{ExtensionContext, FileContext, PathContext, ShapeContext};
