//! Content loader - reads the project, knowledge and writing collections

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{BlogPost, ContentRecord, MarkdownRenderer, Project, WritingPost};
use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::helpers;

/// A record together with the markdown body it was read from
#[derive(Debug, Clone)]
pub struct Document<T> {
    pub meta: T,
    pub body: String,
}

impl<T> Document<T> {
    /// Render the body to sanitized HTML
    pub fn render(&self, renderer: &MarkdownRenderer) -> String {
        renderer.render(&self.body)
    }
}

/// Outcome of reading one collection directory.
///
/// Files that failed to read or parse are listed in `failures` and left out
/// of `documents`; they never hide the rest of the directory.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub documents: Vec<Document<T>>,
    pub failures: Vec<ContentError>,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T: ContentRecord> LoadReport<T> {
    /// Drop the bodies, keeping records in their current order
    pub fn into_records(self) -> Vec<T> {
        self.documents.into_iter().map(|d| d.meta).collect()
    }

    /// Slugs claimed by more than one file, with the files claiming them
    pub fn duplicate_slugs(&self) -> BTreeMap<String, Vec<PathBuf>> {
        let mut seen: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for doc in &self.documents {
            seen.entry(doc.meta.slug().to_string())
                .or_default()
                .push(doc.meta.source().to_path_buf());
        }
        seen.retain(|_, files| files.len() > 1);
        seen
    }

    /// First document with `slug`, in the report's order
    pub fn find(self, slug: &str) -> Option<Document<T>> {
        self.documents.into_iter().find(|d| d.meta.slug() == slug)
    }
}

/// Read every markdown file directly inside `dir` as a `T`.
///
/// A missing directory or an empty one is not an error: the report is
/// empty and a warning is logged. Files are read in file-name order.
pub fn read_collection<T: ContentRecord>(dir: &Path, config: &SiteConfig) -> LoadReport<T> {
    let mut report = LoadReport::default();

    if !dir.is_dir() {
        tracing::warn!("{} directory does not exist: {:?}", T::KIND, dir);
        return report;
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(e) => {
                tracing::warn!("Failed to read entry in {:?}: {}", dir, e);
                None
            }
        })
        .filter(|path| path.is_file() && is_markdown_file(path))
        .collect();

    if files.is_empty() {
        tracing::warn!("No markdown files found in {:?}", dir);
        return report;
    }

    for path in files {
        match read_document::<T>(&path, config) {
            Ok(doc) => report.documents.push(doc),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", T::KIND, e);
                report.failures.push(e);
            }
        }
    }

    for (slug, files) in report.duplicate_slugs() {
        tracing::warn!(
            "Duplicate {} slug {:?} used by {:?}",
            T::KIND,
            slug,
            files
        );
    }

    tracing::debug!(
        "Loaded {} {} file(s) from {:?}, {} failed",
        report.documents.len(),
        T::KIND,
        dir,
        report.failures.len()
    );

    report
}

/// Read and parse a single content file
pub fn read_document<T: ContentRecord>(
    path: &Path,
    config: &SiteConfig,
) -> Result<Document<T>, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (meta, body) = T::from_source(path, &content, config)?;
    Ok(Document {
        meta,
        body: body.to_string(),
    })
}

/// Loads portfolio content from an explicit content root
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    content_dir: PathBuf,
}

impl<'a> ContentLoader<'a> {
    /// Create a loader reading the collections under `content_dir`
    pub fn new<P: Into<PathBuf>>(config: &'a SiteConfig, content_dir: P) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
        }
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.projects_dir)
    }

    pub fn knowledge_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.knowledge_dir)
    }

    pub fn writing_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.writing_dir)
    }

    /// All projects with bodies, ascending by `order`
    pub fn load_projects(&self) -> LoadReport<Project> {
        let mut report = read_collection::<Project>(&self.projects_dir(), self.config);
        report.documents.sort_by_key(|d| d.meta.order);
        report
    }

    /// All projects, ascending by `order`
    pub fn projects(&self) -> Vec<Project> {
        self.load_projects().into_records()
    }

    /// Featured projects for the landing view, ascending by `order`, at most `featured_limit`
    pub fn featured_projects(&self) -> Vec<Project> {
        self.featured_from(self.projects())
    }

    /// Pick the featured entries out of already loaded, ordered projects
    pub fn featured_from(&self, projects: impl IntoIterator<Item = Project>) -> Vec<Project> {
        projects
            .into_iter()
            .filter(|p| p.featured)
            .take(self.config.featured_limit)
            .collect()
    }

    pub fn project(&self, slug: &str) -> Option<Document<Project>> {
        self.load_projects().find(slug)
    }

    /// All knowledge posts with bodies, newest first
    pub fn load_posts(&self) -> LoadReport<BlogPost> {
        let mut report = read_collection::<BlogPost>(&self.knowledge_dir(), self.config);
        report
            .documents
            .sort_by_cached_key(|d| helpers::newest_first(&d.meta.date));
        report
    }

    /// All knowledge posts, newest first
    pub fn posts(&self) -> Vec<BlogPost> {
        self.load_posts().into_records()
    }

    /// The most recent knowledge post, if any
    pub fn latest_post(&self) -> Option<BlogPost> {
        self.posts().into_iter().next()
    }

    pub fn post(&self, slug: &str) -> Option<Document<BlogPost>> {
        self.load_posts().find(slug)
    }

    /// All writing pieces with bodies, newest first
    pub fn load_writing(&self) -> LoadReport<WritingPost> {
        let mut report = read_collection::<WritingPost>(&self.writing_dir(), self.config);
        report
            .documents
            .sort_by_cached_key(|d| helpers::newest_first(&d.meta.date));
        report
    }

    /// All writing pieces, newest first
    pub fn writing(&self) -> Vec<WritingPost> {
        self.load_writing().into_records()
    }

    pub fn writing_post(&self, slug: &str) -> Option<Document<WritingPost>> {
        self.load_writing().find(slug)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
