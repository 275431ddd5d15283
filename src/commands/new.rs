//! Scaffold a new content file

use anyhow::Result;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

use crate::content::DEFAULT_ORDER;
use crate::Portfolio;

/// Create a project, post or writing file and return its path
pub fn create_entry(
    site: &Portfolio,
    kind: &str,
    title: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let loader = site.loader();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let slug = slug
        .map(|s| s.to_string())
        .unwrap_or_else(|| slug::slugify(title));

    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}, pass --slug", title);
    }
    if slug.contains(['/', '\\']) || slug.contains("..") {
        anyhow::bail!("Slug {:?} must not contain path separators or '..'", slug);
    }

    let mut fm = Mapping::new();
    fm.insert("title".into(), title.into());
    fm.insert("slug".into(), slug.clone().into());

    let target_dir = match kind {
        "project" => {
            fm.insert("category".into(), "MVP".into());
            fm.insert("description".into(), "".into());
            fm.insert(
                "thumbnail".into(),
                site.config.default_thumbnail.clone().into(),
            );
            fm.insert("featured".into(), false.into());
            fm.insert("order".into(), Value::from(DEFAULT_ORDER));
            fm.insert("date".into(), today.into());
            loader.projects_dir()
        }
        "post" => {
            fm.insert("date".into(), today.into());
            fm.insert("category".into(), Value::Null);
            fm.insert("tags".into(), Value::Sequence(Vec::new()));
            loader.knowledge_dir()
        }
        "writing" => {
            fm.insert("date".into(), today.into());
            fm.insert("description".into(), "".into());
            loader.writing_dir()
        }
        _ => anyhow::bail!("Unknown kind: {}. Available: project, post, writing", kind),
    };

    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&fm)?);
    fs::write(&file_path, content)?;
    tracing::info!("Created {} {:?}", kind, file_path);

    Ok(file_path)
}
