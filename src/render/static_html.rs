//! Renderer for static HTML fragments.

use std::fs;

use crate::error::{Result, ShapeError};
use crate::harvest::HarvestInfo;
use crate::table::ShapeDescriptor;

use super::{DisplayContext, TemplateRenderer};

/// Emits `html`/`htm` template files verbatim.
#[derive(Debug, Clone, Default)]
pub struct StaticRenderer;

impl StaticRenderer {
    /// Configuration name.
    pub const NAME: &'static str = "html";

    /// Create a new static renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for StaticRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn template_file_extensions(&self) -> Vec<String> {
        vec!["html".to_string(), "htm".to_string()]
    }

    fn render(
        &self,
        _descriptor: &ShapeDescriptor,
        _ctx: &DisplayContext,
        info: &HarvestInfo,
    ) -> Result<String> {
        fs::read_to_string(&info.physical_path).map_err(|e| ShapeError::Render {
            template: info.template_virtual_path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn info(path: std::path::PathBuf) -> HarvestInfo {
        HarvestInfo {
            sub_path: "Views".into(),
            file_name: "Post".into(),
            template_virtual_path: "~/Blog/Views/Post.html".into(),
            physical_path: path,
        }
    }

    #[test]
    fn renders_file_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Post.html");
        fs::write(&path, "<article>post</article>").unwrap();

        let output = StaticRenderer::new()
            .render(
                &ShapeDescriptor::new("Post"),
                &DisplayContext::default(),
                &info(path),
            )
            .unwrap();
        assert_eq!(output, "<article>post</article>");
    }

    #[test]
    fn missing_file_is_render_error() {
        let temp = TempDir::new().unwrap();
        let err = StaticRenderer::new()
            .render(
                &ShapeDescriptor::new("Post"),
                &DisplayContext::default(),
                &info(temp.path().join("gone.html")),
            )
            .unwrap_err();
        assert!(matches!(err, ShapeError::Render { .. }));
        assert!(err.to_string().contains("~/Blog/Views/Post.html"));
    }
}
