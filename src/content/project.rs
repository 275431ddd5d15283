//! Project model

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::frontmatter::{self, ProjectFrontMatter};
use super::{non_empty, slug_or_file_stem, ContentRecord};
use crate::config::SiteConfig;
use crate::error::ContentError;

/// Sort position of a project that does not set `order`
pub const DEFAULT_ORDER: i64 = 999;

pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Stage a project reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectCategory {
    Ideation,
    #[default]
    #[serde(rename = "MVP")]
    Mvp,
    Feedback,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Ideation => "Ideation",
            ProjectCategory::Mvp => "MVP",
            ProjectCategory::Feedback => "Feedback",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = ();

    /// Case-insensitive match on the three category names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ideation" => Ok(ProjectCategory::Ideation),
            "mvp" => Ok(ProjectCategory::Mvp),
            "feedback" => Ok(ProjectCategory::Feedback),
            _ => Err(()),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub category: ProjectCategory,
    pub description: String,
    /// Thumbnail image path, relative to the site root
    pub thumbnail: String,
    pub featured: bool,
    /// Ascending sort key
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figma_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvp_link: Option<String>,
    /// Number of slides in the case-study deck
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<u32>,

    #[serde(skip)]
    pub source: PathBuf,
}

impl Project {
    /// Build a project from parsed frontmatter, filling in defaults
    pub fn from_front_matter(
        path: &Path,
        fm: ProjectFrontMatter,
        config: &SiteConfig,
    ) -> Result<Self, ContentError> {
        let category = match non_empty(fm.category) {
            Some(value) => value.parse().map_err(|_| ContentError::Category {
                path: path.to_path_buf(),
                value,
            })?,
            None => ProjectCategory::default(),
        };

        frontmatter::log_unknown_keys(path, &fm.extra);

        Ok(Self {
            slug: slug_or_file_stem(fm.slug, path),
            title: non_empty(fm.title).unwrap_or_else(|| UNTITLED_PROJECT.to_string()),
            category,
            description: fm.description.unwrap_or_default(),
            thumbnail: non_empty(fm.thumbnail)
                .unwrap_or_else(|| config.default_thumbnail.clone()),
            featured: fm.featured.unwrap_or(false),
            order: fm.order.unwrap_or(DEFAULT_ORDER),
            date: non_empty(fm.date),
            figma_link: non_empty(fm.figma_link),
            mvp_link: non_empty(fm.mvp_link),
            slides: fm.slides,
            source: path.to_path_buf(),
        })
    }
}

impl ContentRecord for Project {
    const KIND: &'static str = "project";

    fn from_source<'c>(
        path: &Path,
        content: &'c str,
        config: &SiteConfig,
    ) -> Result<(Self, &'c str), ContentError> {
        let (fm, body) = frontmatter::parse::<ProjectFrontMatter>(content).map_err(|source| {
            ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok((Self::from_front_matter(path, fm, config)?, body))
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

    fn load(name: &str, content: &str) -> Result<Project, ContentError> {
        Project::from_source(Path::new(name), content, &SiteConfig::default()).map(|(p, _)| p)
    }

    #[test]
    fn test_defaults_applied() {
        let project = load("content/projects/bare.md", "Just a body").unwrap();
        assert_eq!(project.slug, "bare");
        assert_eq!(project.title, UNTITLED_PROJECT);
        assert_eq!(project.category, ProjectCategory::Mvp);
        assert_eq!(project.description, "");
        assert_eq!(project.thumbnail, "/assets/images/projects/placeholder.webp");
        assert!(!project.featured);
        assert_eq!(project.order, DEFAULT_ORDER);
        assert!(project.date.is_none());
        assert!(project.slides.is_none());
    }

    #[test]
    fn test_explicit_fields() {
        let content = r#"---
slug: meal-planner
title: Meal Planner
category: Feedback
description: Weekly plans from what is in the fridge.
thumbnail: /img/meal.webp
featured: true
order: 0
date: 2024-03-15
mvpLink: https://meals.example.com
---
"#;
        let project = load("content/projects/01-meals.md", content).unwrap();
        assert_eq!(project.slug, "meal-planner");
        assert_eq!(project.category, ProjectCategory::Feedback);
        assert_eq!(project.thumbnail, "/img/meal.webp");
        assert!(project.featured);
        assert_eq!(project.order, 0);
        assert_eq!(project.date.as_deref(), Some("2024-03-15"));
        assert_eq!(project.mvp_link.as_deref(), Some("https://meals.example.com"));
        assert!(project.figma_link.is_none());
    }

    #[test]
    fn test_empty_title_falls_back() {
        let project = load("p.md", "---\ntitle: \"\"\n---\n").unwrap();
        assert_eq!(project.title, UNTITLED_PROJECT);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let project = load("p.md", "---\ncategory: ideation\n---\n").unwrap();
        assert_eq!(project.category, ProjectCategory::Ideation);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = load("p.md", "---\ncategory: Shipped\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::Category { ref value, .. } if value == "Shipped"));
    }

    #[test]
    fn test_custom_default_thumbnail() {
        let config = SiteConfig {
            default_thumbnail: "/fallback.png".to_string(),
            ..Default::default()
        };
        let (project, _) = Project::from_source(Path::new("x.md"), "", &config).unwrap();
        assert_eq!(project.thumbnail, "/fallback.png");
    }

    #[test]
    fn test_serialized_keys_match_frontmatter() {
        let content = "---\ntitle: Links\nfigmaLink: https://figma.com/f\nslides: 8\n---\n";
        let project = load("links.md", content).unwrap();
        let value = serde_yaml::to_value(&project).unwrap();
        assert_eq!(value["figmaLink"].as_str(), Some("https://figma.com/f"));
        assert_eq!(value["slides"].as_u64(), Some(8));
        assert_eq!(value["category"].as_str(), Some("MVP"));
        assert!(value.get("mvpLink").is_none());
        assert!(value.get("source").is_none());
    }
}
