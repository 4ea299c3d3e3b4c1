//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter of a document.
///
/// Unknown keys are rejected so that typos surface at load time instead of
/// silently falling back to defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Document id; replaces the last segment of the path-derived id
    #[serde(default)]
    pub id: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,

    /// Position in its sidebar category (lower = first)
    #[serde(default)]
    pub sidebar_position: Option<f64>,

    /// Label used in sidebars instead of the title
    #[serde(default)]
    pub sidebar_label: Option<String>,

    /// Locale this document belongs to; defaults to the tree it lives in
    #[serde(default)]
    pub locale: Option<String>,
}

impl Frontmatter {
    fn validate(self) -> Result<Self, FrontmatterError> {
        if self.title.trim().is_empty() {
            return Err(FrontmatterError::MissingField("title"));
        }
        if let Some(id) = &self.id {
            if id.is_empty() || id.contains('/') {
                return Err(FrontmatterError::InvalidId(id.clone()));
            }
        }
        if let Some(slug) = &self.slug {
            let trimmed = slug.trim_matches('/');
            let bad_segment = trimmed
                .split('/')
                .any(|segment| matches!(segment, "." | "..") || segment.contains('\\'));
            if bad_segment || (!trimmed.is_empty() && trimmed.split('/').any(str::is_empty)) {
                return Err(FrontmatterError::InvalidSlug(slug.clone()));
            }
        }
        if let Some(position) = self.sidebar_position {
            if !position.is_finite() {
                return Err(FrontmatterError::InvalidPosition(position));
            }
        }
        Ok(self)
    }
}

/// Extract frontmatter from a document.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = &after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter.validate()?), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter field `{0}` must not be empty")]
    MissingField(&'static str),

    #[error("Invalid document id `{0}`: ids must be non-empty and contain no `/`")]
    InvalidId(String),

    #[error("Invalid slug `{0}`: segments must be non-empty and not `.` or `..`")]
    InvalidSlug(String),

    #[error("Invalid sidebar_position {0}")]
    InvalidPosition(f64),
}
