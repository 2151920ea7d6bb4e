//! Atomic publication of shape table generations.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::discovery::DiscoveryEngine;
use crate::error::Result;

use super::{ContentFingerprint, ShapeTable, ShapeTableBuilder};

/// Owns the current [`ShapeTable`] and re-runs discovery when it goes stale.
///
/// Readers get an `Arc` to a complete table and never see one that is being
/// built. Passes are serialized; each successful pass publishes a new
/// generation in one swap. A failed pass publishes nothing.
pub struct ShapeTableManager {
    engine: DiscoveryEngine,
    excluded: HashSet<String>,
    current: ArcSwapOption<ShapeTable>,
    pass: Mutex<()>,
    generation: AtomicU64,
    stale: AtomicBool,
    monitor_root: Option<PathBuf>,
    check_interval: Duration,
    last_check: Mutex<Option<Instant>>,
    fingerprint: Mutex<Option<ContentFingerprint>>,
}

impl ShapeTableManager {
    /// Create a manager with content monitoring enabled.
    pub fn new<I, S>(engine: DiscoveryEngine, excluded_feature_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let monitor_root = engine.files().content_root().map(|p| p.to_path_buf());
        Self {
            engine,
            excluded: excluded_feature_ids.into_iter().map(Into::into).collect(),
            current: ArcSwapOption::empty(),
            pass: Mutex::new(()),
            generation: AtomicU64::new(0),
            stale: AtomicBool::new(false),
            monitor_root,
            check_interval: Duration::ZERO,
            last_check: Mutex::new(None),
            fingerprint: Mutex::new(None),
        }
    }

    /// Enable or disable content root monitoring.
    ///
    /// Without monitoring the table only changes through [`refresh`](Self::refresh)
    /// or [`invalidate`](Self::invalidate). Providers without a content root
    /// are never monitored.
    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor_root = if enabled {
            self.engine.files().content_root().map(|p| p.to_path_buf())
        } else {
            None
        };
        self
    }

    /// Compare the content root at most once per `interval`.
    ///
    /// The default of zero checks on every [`table`](Self::table) call.
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// The discovery engine passes run with.
    pub fn engine(&self) -> &DiscoveryEngine {
        &self.engine
    }

    /// Whether file changes under the content root mark the table stale.
    pub fn is_monitoring(&self) -> bool {
        self.monitor_root.is_some()
    }

    /// The last published table, without running discovery.
    pub fn current(&self) -> Option<Arc<ShapeTable>> {
        self.current.load_full()
    }

    /// Number of tables published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Get the current table, discovering first if there is none or it is stale.
    ///
    /// When a re-discovery fails but an earlier table exists, the earlier
    /// table is returned and the failure is logged.
    pub fn table(&self) -> Result<Arc<ShapeTable>> {
        if !self.check_due() {
            if let Some(table) = self.fresh() {
                return Ok(table);
            }
        }

        let _guard = self.pass.lock();

        // Another caller may have published while we waited.
        if let Some(table) = self.fresh() {
            if !self.content_changed() {
                return Ok(table);
            }
        }

        match self.run_pass() {
            Ok(table) => Ok(table),
            Err(e) => match self.current() {
                Some(previous) => Ok(previous),
                None => Err(e),
            },
        }
    }

    /// Run a discovery pass now and publish its table.
    pub fn refresh(&self) -> Result<Arc<ShapeTable>> {
        let _guard = self.pass.lock();
        self.run_pass()
    }

    /// Mark the current table stale; the next [`table`](Self::table) call re-discovers.
    pub fn invalidate(&self) {
        debug!("Shape table invalidated");
        self.stale.store(true, Ordering::Release);
    }

    /// The published table unless it was invalidated.
    fn fresh(&self) -> Option<Arc<ShapeTable>> {
        let table = self.current.load_full()?;
        if self.stale.load(Ordering::Acquire) {
            return None;
        }
        Some(table)
    }

    fn check_due(&self) -> bool {
        if self.monitor_root.is_none() {
            return false;
        }
        match *self.last_check.lock() {
            Some(at) => at.elapsed() >= self.check_interval,
            None => true,
        }
    }

    /// Must be called with the pass lock held.
    fn content_changed(&self) -> bool {
        let Some(root) = &self.monitor_root else {
            return false;
        };
        if !self.check_due() {
            return false;
        }

        let current = ContentFingerprint::compute(root);
        *self.last_check.lock() = Some(Instant::now());
        let changed = self.fingerprint.lock().as_ref() != Some(&current);
        if changed {
            debug!(root = %root.display(), "Content root changed");
        }
        changed
    }

    /// Must be called with the pass lock held.
    fn run_pass(&self) -> Result<Arc<ShapeTable>> {
        // Both are taken before discovery so changes made during the pass trigger another one.
        let fingerprint = self.monitor_root.as_deref().map(ContentFingerprint::compute);
        let was_stale = self.stale.swap(false, Ordering::AcqRel);

        let mut builder = ShapeTableBuilder::with_excluded_features(self.excluded.iter().cloned());
        if let Err(e) = self.engine.discover(&mut builder) {
            error!(
                error = %e,
                generation = self.generation(),
                "Shape discovery failed; keeping the previous shape table"
            );
            if was_stale {
                self.stale.store(true, Ordering::Release);
            }
            return Err(e);
        }

        self.engine.renderers().invalidate_all();

        let table = Arc::new(builder.build());
        self.current.store(Some(Arc::clone(&table)));
        *self.fingerprint.lock() = fingerprint;
        *self.last_check.lock() = Some(Instant::now());
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(
            generation,
            bindings = table.len(),
            shapes = table.descriptors().len(),
            "Published shape table"
        );
        Ok(table)
    }
}

impl std::fmt::Debug for ShapeTableManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeTableManager")
            .field("engine", &self.engine)
            .field("excluded", &self.excluded)
            .field("generation", &self.generation())
            .field("monitor_root", &self.monitor_root)
            .finish_non_exhaustive()
    }
}
