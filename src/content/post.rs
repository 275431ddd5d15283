//! Knowledge post and writing models

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::excerpt::derive_excerpt;
use super::frontmatter::{self, PostFrontMatter, WritingFrontMatter};
use super::{non_empty, slug_or_file_stem, ContentRecord};
use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::helpers;

pub const UNTITLED_POST: &str = "Untitled Post";
pub const UNTITLED_WRITING: &str = "Untitled";

/// A post from the knowledge section
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    /// Date exactly as written in the frontmatter
    pub date: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip)]
    pub source: PathBuf,
}

impl BlogPost {
    /// Publication date, if the frontmatter value parses
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        helpers::parse_date(&self.date)
    }

    /// Build a post from parsed frontmatter, deriving the excerpt from `body` when absent
    pub fn from_front_matter(
        path: &Path,
        fm: PostFrontMatter,
        body: &str,
        config: &SiteConfig,
    ) -> Self {
        frontmatter::log_unknown_keys(path, &fm.extra);

        Self {
            slug: slug_or_file_stem(fm.slug, path),
            title: non_empty(fm.title).unwrap_or_else(|| UNTITLED_POST.to_string()),
            date: non_empty(fm.date).unwrap_or_else(helpers::now_iso),
            excerpt: non_empty(fm.excerpt)
                .unwrap_or_else(|| derive_excerpt(body, config.excerpt_length)),
            category: non_empty(fm.category),
            tags: fm.tags,
            source: path.to_path_buf(),
        }
    }
}

impl ContentRecord for BlogPost {
    const KIND: &'static str = "post";

    fn from_source<'c>(
        path: &Path,
        content: &'c str,
        config: &SiteConfig,
    ) -> Result<(Self, &'c str), ContentError> {
        let (fm, body) = frontmatter::parse::<PostFrontMatter>(content).map_err(|source| {
            ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok((Self::from_front_matter(path, fm, body, config), body))
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn source(&self) -> &Path {
        &self.source
    }
}

/// A long-form piece from the writing section
#[derive(Debug, Clone, Serialize)]
pub struct WritingPost {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    #[serde(skip)]
    pub source: PathBuf,
}

impl WritingPost {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        helpers::parse_date(&self.date)
    }
}

impl ContentRecord for WritingPost {
    const KIND: &'static str = "writing";

    fn from_source<'c>(
        path: &Path,
        content: &'c str,
        _config: &SiteConfig,
    ) -> Result<(Self, &'c str), ContentError> {
        let (fm, body) = frontmatter::parse::<WritingFrontMatter>(content).map_err(|source| {
            ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            }
        })?;
        frontmatter::log_unknown_keys(path, &fm.extra);

        let post = Self {
            slug: slug_or_file_stem(fm.slug, path),
            title: non_empty(fm.title).unwrap_or_else(|| UNTITLED_WRITING.to_string()),
            date: non_empty(fm.date).unwrap_or_else(helpers::now_iso),
            description: fm.description.unwrap_or_default(),
            category: non_empty(fm.category),
            featured: fm.featured,
            source: path.to_path_buf(),
        };
        Ok((post, body))
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(name: &str, content: &str) -> BlogPost {
        BlogPost::from_source(Path::new(name), content, &SiteConfig::default())
            .unwrap()
            .0
    }

    #[test]
    fn test_derived_excerpt() {
        let p = post(
            "knowledge/first.md",
            "---\ntitle: First\ndate: 2024-01-01\n---\n# Heading\n\nThis is the first paragraph of the post.",
        );
        assert_eq!(p.slug, "first");
        assert_eq!(p.excerpt, "This is the first paragraph of the post.");
    }

    #[test]
    fn test_explicit_excerpt_wins() {
        let p = post(
            "k.md",
            "---\nexcerpt: Hand written.\n---\nA very different body.",
        );
        assert_eq!(p.excerpt, "Hand written.");
    }

    #[test]
    fn test_excerpt_length_from_config() {
        let config = SiteConfig {
            excerpt_length: 10,
            ..Default::default()
        };
        let (p, _) = BlogPost::from_source(Path::new("k.md"), "abcdefghijklmnop", &config).unwrap();
        assert_eq!(p.excerpt, "abcdefghij...");
    }

    #[test]
    fn test_missing_fields() {
        let p = post("notes/untitled-idea.md", "");
        assert_eq!(p.title, UNTITLED_POST);
        assert_eq!(p.slug, "untitled-idea");
        assert!(p.published_at().is_some(), "missing date falls back to now");
        assert!(p.category.is_none());
        assert!(p.tags.is_none());
    }

    #[test]
    fn test_tags_and_category() {
        let p = post(
            "k.md",
            "---\ncategory: Research\ntags: [ux, interviews]\n---\nBody",
        );
        assert_eq!(p.category.as_deref(), Some("Research"));
        assert_eq!(
            p.tags,
            Some(vec!["ux".to_string(), "interviews".to_string()])
        );
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = BlogPost::from_source(
            Path::new("broken.md"),
            "---\ntitle: [unclosed\n---\n",
            &SiteConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.path(), Path::new("broken.md"));
    }

    #[test]
    fn test_writing_post() {
        let (w, body) = WritingPost::from_source(
            Path::new("writing/on-craft.md"),
            "---\ntitle: On Craft\ndate: 2023-11-02\ndescription: Notes on making things.\nfeatured: true\n---\nEssay body",
            &SiteConfig::default(),
        )
        .unwrap();
        assert_eq!(w.slug, "on-craft");
        assert_eq!(w.title, "On Craft");
        assert_eq!(w.description, "Notes on making things.");
        assert_eq!(w.featured, Some(true));
        assert_eq!(body, "Essay body");
    }
}
