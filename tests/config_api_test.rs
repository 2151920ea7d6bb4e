//! Integration tests for config module public API.

use shapebind::config::{
    build_manager, load_config, load_merged_config, validate, ShapesConfig, CONFIG_DIR,
};
use shapebind::render::DisplayContext;
use shapebind::ShapeError;
use std::fs;
use tempfile::TempDir;

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

#[test]
fn public_api_is_accessible() {
    let config = ShapesConfig::default();
    assert_eq!(config.settings.harvesters, vec!["basic"]);
    assert!(config.extensions.is_empty());
}

#[test]
fn full_config_workflow() {
    let temp = project(
        r#"
settings:
  content_root: site
extensions:
  - id: Blog
    features: [Blog, Blog.Comments]
features:
  enabled: [Blog]
"#,
    );
    fs::create_dir_all(temp.path().join("site/Blog/Views")).unwrap();
    fs::write(temp.path().join("site/Blog/Views/Post.html"), "<p>post</p>").unwrap();

    let config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    let manager = build_manager(&config, temp.path(), &[]).unwrap();
    let table = manager.table().unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.render("Post", &DisplayContext::default()).unwrap(),
        "<p>post</p>"
    );
}

#[test]
fn local_config_overrides_project_config() {
    let temp = project(
        r#"
extensions:
  - id: Blog
features:
  enabled: [Blog]
"#,
    );
    fs::write(
        temp.path().join(CONFIG_DIR).join("config.local.yml"),
        "settings:\n  disable_monitoring: true\n",
    )
    .unwrap();

    let config = load_merged_config(temp.path()).unwrap();
    assert!(config.settings.disable_monitoring);
    assert_eq!(config.features.enabled, vec!["Blog"]);

    let manager = build_manager(&config, temp.path(), &[]).unwrap();
    assert!(!manager.is_monitoring());
}

#[test]
fn override_path_skips_merging() {
    let temp = project("extensions:\n  - id: Blog\n");
    let other = temp.path().join("other.yml");
    fs::write(&other, "extensions:\n  - id: Pages\n").unwrap();

    let config = load_config(temp.path(), Some(&other)).unwrap();
    assert_eq!(config.extensions.len(), 1);
    assert_eq!(config.extensions[0].id, "Pages");
}

#[test]
fn missing_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let err = load_merged_config(temp.path()).unwrap_err();
    assert!(matches!(err, ShapeError::ConfigNotFound { .. }));
}

#[test]
fn validation_reports_unknown_features() {
    let temp = project(
        r#"
extensions:
  - id: Blog
features:
  enabled: [Blog, Shop]
"#,
    );
    let config = load_merged_config(temp.path()).unwrap();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("Shop"));
}
