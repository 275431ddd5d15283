//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub projects_dir: String,
    pub knowledge_dir: String,
    pub writing_dir: String,
    pub static_dir: String,

    // Defaults applied to records
    pub default_thumbnail: String,
    pub featured_limit: usize,
    pub excerpt_length: usize,

    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            projects_dir: "projects".to_string(),
            knowledge_dir: "knowledge".to_string(),
            writing_dir: "writing".to_string(),
            static_dir: "public".to_string(),

            default_thumbnail: "/assets/images/projects/placeholder.webp".to_string(),
            featured_limit: 3,
            excerpt_length: 200,

            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {:?}", path))?;
        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Syntax highlight fenced code blocks
    pub highlight: bool,
    /// Name of a syntect bundled theme
    pub theme: String,
    pub line_numbers: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}
