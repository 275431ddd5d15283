//! folio: the content engine behind a personal portfolio site
//!
//! Projects, knowledge posts and writing live as markdown files with YAML
//! frontmatter. This crate reads them into typed records with defaults
//! applied, sorts and filters them for the site's views, and renders
//! bodies to sanitized HTML.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{BlogPost, ContentLoader, Document, Project, ProjectCategory, WritingPost};
pub use error::ContentError;

/// A portfolio site rooted at a base directory
#[derive(Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding the collections
    pub content_dir: PathBuf,
    /// Static assets served next to the API
    pub static_dir: PathBuf,
}

impl Portfolio {
    /// Open a site, reading `_config.yml` from `base_dir` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        }
    }

    /// A loader over this site's content root
    pub fn loader(&self) -> ContentLoader<'_> {
        ContentLoader::new(&self.config, &self.content_dir)
    }

    /// A markdown renderer with this site's settings
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.markdown)
    }
}
