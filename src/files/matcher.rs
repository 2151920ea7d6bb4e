//! Glob matching of template files by extension.

use glob::{MatchOptions, Pattern};

use crate::error::{Result, ShapeError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A set of `*.<ext>` include patterns, one per distinct extension.
///
/// Patterns do not cross `/`, so only files directly inside a searched
/// directory match.
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    extensions: Vec<String>,
    patterns: Vec<Pattern>,
}

impl TemplateMatcher {
    /// Build a matcher from file extensions (without leading dot).
    ///
    /// Extensions are lower-cased and deduplicated, keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `NoTemplateExtensions` when no extension is given.
    pub fn for_extensions<I, S>(extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !distinct.contains(&ext) {
                distinct.push(ext);
            }
        }

        if distinct.is_empty() {
            return Err(ShapeError::NoTemplateExtensions);
        }

        let patterns = distinct
            .iter()
            .map(|ext| {
                Pattern::new(&format!("*.{}", Pattern::escape(ext))).map_err(|e| {
                    ShapeError::ConfigValidationError {
                        message: format!("invalid template extension '{}': {}", ext, e),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions: distinct,
            patterns,
        })
    }

    /// Check a `/`-separated path relative to the searched directory.
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative_path, MATCH_OPTIONS))
    }

    /// Distinct extensions covered by this matcher.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Include patterns, as strings.
    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.as_str()).collect()
    }
}
