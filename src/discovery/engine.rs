//! The discovery pass.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::error::{Result, ShapeError};
use crate::extension::{Extension, FeatureActivationResolver, FeatureStateProvider};
use crate::files::{join_virtual, FileEntry, FileProvider, TemplateMatcher};
use crate::harvest::{validate_sub_path, HarvestInfo, HarvesterSet};
use crate::render::RendererSet;
use crate::table::ShapeTableBuilder;

use super::stages::{ExtensionContext, FileContext, PathContext, ShapeContext};

/// Discovers shape templates and registers their bindings.
#[derive(Clone)]
pub struct DiscoveryEngine {
    harvesters: HarvesterSet,
    renderers: RendererSet,
    features: Arc<dyn FeatureStateProvider>,
    files: Arc<dyn FileProvider>,
}

impl DiscoveryEngine {
    /// Create an engine from its collaborators.
    pub fn new(
        harvesters: HarvesterSet,
        renderers: RendererSet,
        features: Arc<dyn FeatureStateProvider>,
        files: Arc<dyn FileProvider>,
    ) -> Self {
        Self {
            harvesters,
            renderers,
            features,
            files,
        }
    }

    /// Registered harvesters.
    pub fn harvesters(&self) -> &HarvesterSet {
        &self.harvesters
    }

    /// Registered renderers.
    pub fn renderers(&self) -> &RendererSet {
        &self.renderers
    }

    /// The file provider templates are read through.
    pub fn files(&self) -> &dyn FileProvider {
        self.files.as_ref()
    }

    /// The extensions a pass would visit, in visiting order.
    pub fn active_extensions(&self, builder: &ShapeTableBuilder) -> Result<Vec<Arc<Extension>>> {
        FeatureActivationResolver::new(self.features.as_ref())
            .active_extensions(builder.excluded_feature_ids())
    }

    /// Run one discovery pass into `builder`.
    ///
    /// The pass is all-or-nothing: bindings are registered only once every
    /// extension has been walked and harvested. On error the builder is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `NoTemplateExtensions` / `InvalidSubPath` for setup problems
    /// - `FeatureState` when enabled features cannot be read (before any I/O)
    /// - `Io` / `Walk` when a directory exists but cannot be enumerated
    /// - `HarvesterFault` when a harvester fails on a file
    pub fn discover(&self, builder: &mut ShapeTableBuilder) -> Result<()> {
        info!("Start discovering shapes");

        let matcher = TemplateMatcher::for_extensions(self.renderers.all_extensions())?;
        let sub_paths = self.harvester_sub_paths()?;
        let extensions = self.active_extensions(builder)?;

        let mut shapes = Vec::new();
        for extension in extensions {
            let context = ExtensionContext { extension };
            shapes.extend(self.discover_extension(&context, &sub_paths, &matcher)?);
        }

        for shape in &shapes {
            self.register(builder, shape);
        }

        info!(bindings = builder.len(), "Done discovering shapes");
        Ok(())
    }

    /// Distinct, validated sub-paths across all harvesters, in first-seen order.
    fn harvester_sub_paths(&self) -> Result<Vec<String>> {
        let mut sub_paths: Vec<String> = Vec::new();
        for harvester in self.harvesters.iter() {
            for sub_path in harvester.sub_paths() {
                let sub_path = validate_sub_path(harvester.name(), &sub_path)?;
                if !sub_paths.contains(&sub_path) {
                    sub_paths.push(sub_path);
                }
            }
        }
        Ok(sub_paths)
    }

    fn discover_extension(
        &self,
        context: &ExtensionContext,
        sub_paths: &[String],
        matcher: &TemplateMatcher,
    ) -> Result<Vec<ShapeContext>> {
        let extension = &context.extension;

        info!(extension = %extension.id, "Start discovering candidate views filenames");
        let paths = sub_paths
            .iter()
            .map(|sub_path| self.path_context(extension, sub_path, matcher))
            .collect::<Result<Vec<_>>>()?;
        info!(extension = %extension.id, "Done discovering candidate views filenames");

        let mut shapes = Vec::new();
        for path in &paths {
            for file in &path.files {
                let Some(file) = self.file_context(extension, path, file) else {
                    continue;
                };
                for harvester in self.harvesters.iter() {
                    let hits = harvester.harvest_shape(&file.harvest_info).map_err(|e| {
                        ShapeError::HarvesterFault {
                            harvester: harvester.name().to_string(),
                            template: file.harvest_info.template_virtual_path.clone(),
                            message: e.to_string(),
                        }
                    })?;
                    shapes.extend(hits.into_iter().map(|hit| ShapeContext {
                        extension: Arc::clone(extension),
                        file: file.clone(),
                        hit,
                    }));
                }
            }
        }

        Ok(shapes)
    }

    fn path_context(
        &self,
        extension: &Extension,
        sub_path: &str,
        matcher: &TemplateMatcher,
    ) -> Result<PathContext> {
        let virtual_path = join_virtual(&[&extension.sub_path, sub_path]);
        let directory = self.files.resolve_directory(extension, sub_path)?;

        let files = match &directory {
            Some(dir) => self.files.list_files(dir, matcher)?,
            None => {
                trace!(path = %virtual_path, "No template directory");
                Vec::new()
            }
        };

        Ok(PathContext {
            sub_path: sub_path.to_string(),
            virtual_path,
            directory,
            files,
        })
    }

    fn file_context(
        &self,
        extension: &Extension,
        path: &PathContext,
        file: &FileEntry,
    ) -> Option<FileContext> {
        let file_name = Path::new(&file.name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let harvest_info = HarvestInfo {
            sub_path: path.sub_path.clone(),
            file_name,
            template_virtual_path: format!(
                "~/{}",
                join_virtual(&[&extension.sub_path, &path.sub_path, &file.relative_path])
            ),
            physical_path: file.physical_path.clone(),
        };

        let renderer = harvest_info
            .template_extension()
            .and_then(|ext| self.renderers.resolve(ext));

        match renderer {
            Some(renderer) => Some(FileContext {
                harvest_info: Arc::new(harvest_info),
                renderer,
            }),
            None => {
                trace!(template = %harvest_info.template_virtual_path, "No renderer for template");
                None
            }
        }
    }

    /// Templates are bound to every feature of the extension they live in.
    fn register(&self, builder: &mut ShapeTableBuilder, shape: &ShapeContext) {
        for feature in &shape.extension.features {
            debug!(
                "Binding {} as shape [{}] for feature {}",
                shape.file.harvest_info.template_virtual_path, shape.hit.shape_type, feature.id
            );

            let info = Arc::clone(&shape.file.harvest_info);
            let renderer = Arc::clone(&shape.file.renderer);
            builder
                .describe(&shape.hit.shape_type)
                .from(feature)
                .bound_as(
                    shape.file.harvest_info.template_virtual_path.clone(),
                    move |descriptor, ctx| renderer.render(descriptor, ctx, &info),
                );
        }
    }
}

impl std::fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("harvesters", &self.harvesters)
            .field("renderers", &self.renderers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{EnabledFeature, StaticFeatureProvider};
    use crate::files::PhysicalFileProvider;
    use crate::harvest::{FileNameHarvester, ShapeHit, TemplateHarvester};
    use crate::render::DisplayContext;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn blog_provider(enabled: &[&str]) -> Arc<StaticFeatureProvider> {
        Arc::new(StaticFeatureProvider::new(
            vec![Extension::new("Blog", "Blog", &["Blog", "Blog.Comments"])],
            enabled,
        ))
    }

    fn engine(root: &Path, harvesters: HarvesterSet) -> DiscoveryEngine {
        DiscoveryEngine::new(
            harvesters,
            RendererSet::with_builtins(),
            blog_provider(&["Blog", "Blog.Comments"]),
            Arc::new(PhysicalFileProvider::new(root)),
        )
    }

    fn file_name_only() -> HarvesterSet {
        let mut set = HarvesterSet::new();
        set.register(Arc::new(FileNameHarvester));
        set
    }

    #[test]
    fn binds_template_to_every_feature_of_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Post.html", "<p>post</p>");

        let mut builder = ShapeTableBuilder::new();
        engine(temp.path(), file_name_only())
            .discover(&mut builder)
            .unwrap();

        let table = builder.build();
        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].shape_type, "Post");
        assert_eq!(records[0].feature, "Blog");
        assert_eq!(records[1].feature, "Blog.Comments");
        assert!(records
            .iter()
            .all(|r| r.template == "~/Blog/Views/Post.html"));

        let html = table.render("Post", &DisplayContext::default()).unwrap();
        assert_eq!(html, "<p>post</p>");
    }

    #[test]
    fn unadvertised_extensions_are_invisible() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Post.txt", "text");

        let mut builder = ShapeTableBuilder::new();
        engine(temp.path(), file_name_only())
            .discover(&mut builder)
            .unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn missing_directories_yield_nothing() {
        let temp = TempDir::new().unwrap();
        let mut builder = ShapeTableBuilder::new();
        engine(temp.path(), HarvesterSet::with_builtins())
            .discover(&mut builder)
            .unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn every_harvester_sees_every_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Parts/Body.hbs", "{{body}}");

        let mut harvesters = HarvesterSet::with_builtins();
        harvesters.register(Arc::new(FileNameHarvester));

        let mut builder = ShapeTableBuilder::new();
        engine(temp.path(), harvesters)
            .discover(&mut builder)
            .unwrap();

        // `Views/Parts` is only declared by the basic harvester, but the
        // file-name harvester still runs over the file found there.
        let shapes: Vec<&str> = builder
            .bindings()
            .iter()
            .map(|b| b.shape_type.as_str())
            .collect();
        assert_eq!(shapes, vec!["Parts_Body", "Parts_Body", "Body", "Body"]);
    }

    #[test]
    fn shared_sub_paths_are_walked_once() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Post.html", "x");

        let mut harvesters = HarvesterSet::new();
        harvesters.register(Arc::new(FileNameHarvester));
        harvesters.register(Arc::new(FileNameHarvester));

        let mut builder = ShapeTableBuilder::new();
        engine(temp.path(), harvesters)
            .discover(&mut builder)
            .unwrap();

        // One file, two harvesters, two features.
        assert_eq!(builder.len(), 4);
    }

    #[test]
    fn excluded_features_skip_their_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Post.html", "x");

        let mut builder = ShapeTableBuilder::with_excluded_features(["Blog", "Blog.Comments"]);
        engine(temp.path(), file_name_only())
            .discover(&mut builder)
            .unwrap();
        assert!(builder.is_empty());
    }

    struct FailingHarvester;

    impl TemplateHarvester for FailingHarvester {
        fn name(&self) -> &str {
            "failing"
        }

        fn sub_paths(&self) -> Vec<String> {
            vec!["Views".to_string()]
        }

        fn harvest_shape(&self, info: &HarvestInfo) -> Result<Vec<ShapeHit>> {
            if info.file_name == "Broken" {
                return Err(ShapeError::Other(anyhow::anyhow!("cannot parse name")));
            }
            Ok(vec![ShapeHit::new(info.file_name.clone())])
        }
    }

    #[test]
    fn harvester_fault_registers_nothing() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Blog/Views/Alpha.html", "a");
        write(temp.path(), "Blog/Views/Broken.html", "b");
        write(temp.path(), "Blog/Views/Zeta.html", "z");

        let mut harvesters = HarvesterSet::new();
        harvesters.register(Arc::new(FailingHarvester));

        let mut builder = ShapeTableBuilder::new();
        let err = engine(temp.path(), harvesters)
            .discover(&mut builder)
            .unwrap_err();

        assert!(matches!(err, ShapeError::HarvesterFault { ref harvester, .. } if harvester == "failing"));
        assert!(err.to_string().contains("~/Blog/Views/Broken.html"));
        assert!(builder.is_empty());
    }

    struct EscapingHarvester;

    impl TemplateHarvester for EscapingHarvester {
        fn name(&self) -> &str {
            "escaping"
        }

        fn sub_paths(&self) -> Vec<String> {
            vec!["../Shared".to_string()]
        }

        fn harvest_shape(&self, _info: &HarvestInfo) -> Result<Vec<ShapeHit>> {
            Ok(vec![])
        }
    }

    #[test]
    fn escaping_sub_path_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let mut harvesters = HarvesterSet::new();
        harvesters.register(Arc::new(EscapingHarvester));

        let err = engine(temp.path(), harvesters)
            .discover(&mut ShapeTableBuilder::new())
            .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidSubPath { .. }));
    }

    #[test]
    fn no_renderer_extensions_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let engine = DiscoveryEngine::new(
            HarvesterSet::with_builtins(),
            RendererSet::new(),
            blog_provider(&["Blog"]),
            Arc::new(PhysicalFileProvider::new(temp.path())),
        );
        let err = engine.discover(&mut ShapeTableBuilder::new()).unwrap_err();
        assert!(matches!(err, ShapeError::NoTemplateExtensions));
    }

    struct FailingFeatures;

    impl FeatureStateProvider for FailingFeatures {
        fn enabled_features(&self) -> Result<Vec<EnabledFeature>> {
            Err(ShapeError::FeatureState {
                message: "store offline".into(),
            })
        }
    }

    struct CountingFiles {
        inner: PhysicalFileProvider,
        resolved: AtomicUsize,
    }

    impl FileProvider for CountingFiles {
        fn resolve_directory(
            &self,
            extension: &Extension,
            sub_path: &str,
        ) -> Result<Option<crate::files::DirectoryHandle>> {
            self.resolved.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve_directory(extension, sub_path)
        }

        fn list_files(
            &self,
            directory: &crate::files::DirectoryHandle,
            matcher: &TemplateMatcher,
        ) -> Result<Vec<FileEntry>> {
            self.inner.list_files(directory, matcher)
        }
    }

    #[test]
    fn feature_state_fault_aborts_before_io() {
        let temp = TempDir::new().unwrap();
        let files = Arc::new(CountingFiles {
            inner: PhysicalFileProvider::new(temp.path()),
            resolved: AtomicUsize::new(0),
        });
        let engine = DiscoveryEngine::new(
            HarvesterSet::with_builtins(),
            RendererSet::with_builtins(),
            Arc::new(FailingFeatures),
            files.clone(),
        );

        let err = engine.discover(&mut ShapeTableBuilder::new()).unwrap_err();
        assert!(matches!(err, ShapeError::FeatureState { .. }));
        assert_eq!(files.resolved.load(Ordering::SeqCst), 0);
    }
}
