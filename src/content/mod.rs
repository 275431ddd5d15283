//! Content module - portfolio records and the loaders that read them

mod excerpt;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod project;

use std::path::Path;

pub use excerpt::{derive_excerpt, NO_EXCERPT};
pub use loader::{ContentLoader, Document, LoadReport};
pub use markdown::MarkdownRenderer;
pub use post::{BlogPost, WritingPost, UNTITLED_POST, UNTITLED_WRITING};
pub use project::{Project, ProjectCategory, DEFAULT_ORDER, UNTITLED_PROJECT};

use crate::config::SiteConfig;
use crate::error::ContentError;

/// A record type read from one markdown file of a collection
pub trait ContentRecord: Sized {
    /// Singular name used in log lines
    const KIND: &'static str;

    /// Parse the whole file `content`, returning the record and the body after the frontmatter
    fn from_source<'c>(
        path: &Path,
        content: &'c str,
        config: &SiteConfig,
    ) -> Result<(Self, &'c str), ContentError>;

    fn slug(&self) -> &str;

    fn source(&self) -> &Path;
}

/// Treat blank strings the same as a missing field
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Frontmatter slug, or the file name without its extension
pub(crate) fn slug_or_file_stem(slug: Option<String>, path: &Path) -> String {
    non_empty(slug).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
