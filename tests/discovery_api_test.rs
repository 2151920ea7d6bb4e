//! Integration tests for the discovery pass through the public API.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use shapebind::discovery::DiscoveryEngine;
use shapebind::error::{Result, ShapeError};
use shapebind::extension::{Extension, StaticFeatureProvider};
use shapebind::files::{
    DirectoryHandle, FileEntry, FileProvider, PhysicalFileProvider, TemplateMatcher,
};
use shapebind::harvest::{
    FileNameHarvester, HarvestInfo, HarvesterSet, ShapeHit, TemplateHarvester,
};
use shapebind::render::{DisplayContext, RendererSet};
use shapebind::table::{ShapeTableBuilder, ShapeTableManager};
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn file_name_harvesters() -> HarvesterSet {
    let mut set = HarvesterSet::new();
    set.register(Arc::new(FileNameHarvester));
    set
}

fn engine_with(
    root: &Path,
    harvesters: HarvesterSet,
    extensions: Vec<Extension>,
    enabled: &[&str],
) -> DiscoveryEngine {
    DiscoveryEngine::new(
        harvesters,
        RendererSet::with_builtins(),
        Arc::new(StaticFeatureProvider::new(extensions, enabled)),
        Arc::new(PhysicalFileProvider::new(root)),
    )
}

fn blog() -> Extension {
    Extension::new("Blog", "Blog", &["Blog", "Blog.Comments"])
}

/// Counts how often each virtual directory is resolved.
struct CountingFiles {
    inner: PhysicalFileProvider,
    resolved: Mutex<HashMap<String, usize>>,
}

impl CountingFiles {
    fn new(root: &Path) -> Self {
        Self {
            inner: PhysicalFileProvider::new(root),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    fn count(&self, virtual_path: &str) -> usize {
        self.resolved
            .lock()
            .unwrap()
            .get(virtual_path)
            .copied()
            .unwrap_or(0)
    }
}

impl FileProvider for CountingFiles {
    fn resolve_directory(
        &self,
        extension: &Extension,
        sub_path: &str,
    ) -> Result<Option<DirectoryHandle>> {
        let key = format!("{}/{}", extension.sub_path, sub_path);
        *self.resolved.lock().unwrap().entry(key).or_insert(0) += 1;
        self.inner.resolve_directory(extension, sub_path)
    }

    fn list_files(
        &self,
        directory: &DirectoryHandle,
        matcher: &TemplateMatcher,
    ) -> Result<Vec<FileEntry>> {
        self.inner.list_files(directory, matcher)
    }
}

/// Fails on the nth file it is shown.
struct FailOnNth {
    nth: usize,
    seen: Mutex<usize>,
}

impl TemplateHarvester for FailOnNth {
    fn name(&self) -> &str {
        "fail-on-nth"
    }

    fn sub_paths(&self) -> Vec<String> {
        vec!["Views".to_string()]
    }

    fn harvest_shape(&self, info: &HarvestInfo) -> Result<Vec<ShapeHit>> {
        let mut seen = self.seen.lock().unwrap();
        *seen += 1;
        if *seen == self.nth {
            return Err(ShapeError::Other(anyhow::anyhow!("cannot read name")));
        }
        Ok(vec![ShapeHit::new(info.file_name.clone())])
    }
}

#[test]
fn blog_example_binds_post_for_each_feature() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Blog/Views/Post.html", "<p>post</p>");

    let engine = engine_with(
        temp.path(),
        file_name_harvesters(),
        vec![blog()],
        &["Blog", "Blog.Comments"],
    );
    let mut builder = ShapeTableBuilder::new();
    engine.discover(&mut builder).unwrap();
    let table = builder.build();

    let records: Vec<String> = table
        .records()
        .into_iter()
        .map(|r| format!("({}, {}) -> {}", r.shape_type, r.feature, r.template))
        .collect();
    assert_eq!(
        records,
        vec![
            "(Post, Blog) -> ~/Blog/Views/Post.html",
            "(Post, Blog.Comments) -> ~/Blog/Views/Post.html",
        ]
    );
    assert_eq!(
        table.render("Post", &DisplayContext::default()).unwrap(),
        "<p>post</p>"
    );
}

#[test]
fn consecutive_passes_are_identical() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Blog/Views/Post.html", "<p>post</p>");
    write(temp.path(), "Blog/Views/Archive.hbs", "{{year}}");
    write(temp.path(), "Blog/Views/Parts/Body.html", "<div></div>");
    write(temp.path(), "Themes/TheTheme/Views/Layout.html", "<html></html>");

    let engine = engine_with(
        temp.path(),
        HarvesterSet::with_builtins(),
        vec![blog(), Extension::new("TheTheme", "Themes/TheTheme", &["TheTheme"])],
        &["TheTheme", "Blog"],
    );

    let pass = || {
        let mut builder = ShapeTableBuilder::new();
        engine.discover(&mut builder).unwrap();
        builder.build().records()
    };
    let first = pass();
    assert_eq!(first, pass());

    let listing: Vec<String> = first
        .iter()
        .map(|r| format!("{} | {} | {}", r.shape_type, r.feature, r.template))
        .collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    Layout | TheTheme | ~/Themes/TheTheme/Views/Layout.html
    Archive | Blog | ~/Blog/Views/Archive.hbs
    Archive | Blog.Comments | ~/Blog/Views/Archive.hbs
    Post | Blog | ~/Blog/Views/Post.html
    Post | Blog.Comments | ~/Blog/Views/Post.html
    Parts_Body | Blog | ~/Blog/Views/Parts/Body.html
    Parts_Body | Blog.Comments | ~/Blog/Views/Parts/Body.html
    ");
}

#[test]
fn sibling_features_scan_extension_once() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Blog/Views/Post.html", "<p>post</p>");

    let files = Arc::new(CountingFiles::new(temp.path()));
    let engine = DiscoveryEngine::new(
        HarvesterSet::with_builtins(),
        RendererSet::with_builtins(),
        Arc::new(StaticFeatureProvider::new(vec![blog()], &["Blog", "Blog.Comments"])),
        files.clone(),
    );

    let mut builder = ShapeTableBuilder::new();
    engine.discover(&mut builder).unwrap();

    assert_eq!(files.count("Blog/Views"), 1);
    assert_eq!(files.count("Blog/Views/Parts"), 1);
}

#[test]
fn unadvertised_file_extensions_never_bind() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Blog/Views/Post.txt", "post");
    write(temp.path(), "Blog/Views/Post.md", "# post");
    write(temp.path(), "Blog/Views/Page.hbs", "{{title}}");

    let engine = engine_with(temp.path(), file_name_harvesters(), vec![blog()], &["Blog"]);
    let mut builder = ShapeTableBuilder::new();
    engine.discover(&mut builder).unwrap();
    let table = builder.build();

    assert_eq!(table.shape_types(), vec!["Page"]);
}

#[test]
fn fan_out_matches_feature_count() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Shop/Views/Cart.html", "<cart/>");

    let shop = Extension::new("Shop", "Shop", &["Shop", "Shop.Orders", "Shop.Coupons"]);
    let engine = engine_with(
        temp.path(),
        file_name_harvesters(),
        vec![shop],
        &["Shop", "Shop.Orders", "Shop.Coupons"],
    );
    let mut builder = ShapeTableBuilder::new();
    engine.discover(&mut builder).unwrap();
    let records = builder.build().records();

    assert_eq!(records.len(), 3);
    assert!(records
        .iter()
        .all(|r| r.template == "~/Shop/Views/Cart.html"));
}

#[test]
fn missing_directories_are_not_errors() {
    let temp = TempDir::new().unwrap();

    let engine = engine_with(
        temp.path(),
        HarvesterSet::with_builtins(),
        vec![blog()],
        &["Blog"],
    );
    let mut builder = ShapeTableBuilder::new();
    engine.discover(&mut builder).unwrap();

    assert!(builder.is_empty());
}

#[test]
fn harvester_fault_publishes_nothing() {
    let temp = TempDir::new().unwrap();
    for i in 0..10 {
        write(temp.path(), &format!("Blog/Views/Shape{:02}.html", i), "<p></p>");
    }

    let mut harvesters = HarvesterSet::new();
    harvesters.register(Arc::new(FailOnNth {
        nth: 5,
        seen: Mutex::new(0),
    }));
    let engine = engine_with(temp.path(), harvesters, vec![blog()], &["Blog"]);

    let mut builder = ShapeTableBuilder::new();
    let err = engine.discover(&mut builder).unwrap_err();

    assert!(matches!(err, ShapeError::HarvesterFault { .. }));
    assert!(err.to_string().contains("~/Blog/Views/Shape04.html"));
    assert!(builder.is_empty());
}

#[test]
fn manager_keeps_previous_table_after_fault() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Blog/Views/Post.html", "<p>post</p>");

    let mut harvesters = HarvesterSet::new();
    harvesters.register(Arc::new(FailOnNth {
        nth: 2,
        seen: Mutex::new(0),
    }));
    let engine = engine_with(temp.path(), harvesters, vec![blog()], &["Blog"]);
    let manager = ShapeTableManager::new(engine, Vec::<String>::new()).with_monitoring(false);

    let first = manager.table().unwrap();
    assert_eq!(first.len(), 2);

    assert!(manager.refresh().is_err());
    let current = manager.table().unwrap();
    assert!(Arc::ptr_eq(&first, &current));
    assert_eq!(manager.generation(), 1);
}
