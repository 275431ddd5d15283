//! Export every collection as JSON or YAML

use anyhow::Result;
use serde::Serialize;

use crate::content::{BlogPost, Project, WritingPost};
use crate::Portfolio;

/// Everything the presentation layer reads, in one document
#[derive(Debug, Serialize)]
pub struct SiteExport {
    pub projects: Vec<Project>,
    pub featured: Vec<Project>,
    pub posts: Vec<BlogPost>,
    pub latest: Option<BlogPost>,
    pub writing: Vec<WritingPost>,
}

impl SiteExport {
    pub fn collect(site: &Portfolio) -> Self {
        let loader = site.loader();
        let projects = loader.projects();
        let featured = loader.featured_from(projects.iter().cloned());
        let posts = loader.posts();
        let latest = posts.first().cloned();

        Self {
            projects,
            featured,
            posts,
            latest,
            writing: loader.writing(),
        }
    }
}

/// Print the export in `format` (`json` or `yaml`)
pub fn run(site: &Portfolio, format: &str) -> Result<()> {
    let export = SiteExport::collect(site);

    let text = match format {
        "json" => serde_json::to_string_pretty(&export)? + "\n",
        "yaml" | "yml" => serde_yaml::to_string(&export)?,
        _ => anyhow::bail!("Unknown format: {}. Available: json, yaml", format),
    };

    print!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_matches_loader() {
        let dir = tempfile::tempdir().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();
        let projects = site.loader().projects_dir();
        let knowledge = site.loader().knowledge_dir();
        fs::create_dir_all(&projects).unwrap();
        fs::create_dir_all(&knowledge).unwrap();
        for (name, order) in [("a", 4), ("b", 3), ("c", 2), ("d", 1)] {
            fs::write(
                projects.join(format!("{}.md", name)),
                format!("---\nfeatured: true\norder: {}\n---\n", order),
            )
            .unwrap();
        }
        fs::write(knowledge.join("only.md"), "---\ndate: 2024-01-01\n---\nHi").unwrap();

        let export = SiteExport::collect(&site);
        assert_eq!(export.projects.len(), 4);
        let featured: Vec<_> = export.featured.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(featured, vec!["d", "c", "b"]);
        assert_eq!(export.latest.unwrap().slug, "only");
        assert!(export.writing.is_empty());
    }

    #[test]
    fn test_empty_site_exports_null_latest() {
        let dir = tempfile::tempdir().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();
        let json = serde_json::to_value(SiteExport::collect(&site)).unwrap();
        assert!(json["latest"].is_null());
        assert_eq!(json["projects"], serde_json::json!([]));
    }

    #[test]
    fn test_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();
        assert!(run(&site, "toml").is_err());
    }
}
