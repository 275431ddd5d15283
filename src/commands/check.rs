//! Validate site content

use anyhow::Result;
use std::path::PathBuf;

use crate::content::{ContentRecord, LoadReport};
use crate::Portfolio;

/// Problems found across all collections
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Files that could not be read or parsed, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// (collection, slug, files) for every slug claimed more than once
    pub duplicates: Vec<(&'static str, String, Vec<PathBuf>)>,
    pub checked: usize,
}

impl CheckReport {
    pub fn inspect(site: &Portfolio) -> Self {
        let loader = site.loader();
        let mut report = Self::default();
        report.absorb(loader.load_projects());
        report.absorb(loader.load_posts());
        report.absorb(loader.load_writing());
        report
    }

    fn absorb<T: ContentRecord>(&mut self, load: LoadReport<T>) {
        for (slug, files) in load.duplicate_slugs() {
            self.duplicates.push((T::KIND, slug, files));
        }
        self.checked += load.documents.len() + load.failures.len();
        self.failures.extend(
            load.failures
                .into_iter()
                .map(|e| (e.path().to_path_buf(), e.to_string())),
        );
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.duplicates.is_empty()
    }
}

/// Report problems; with `strict`, any problem fails the command
pub fn run(site: &Portfolio, strict: bool) -> Result<()> {
    let report = CheckReport::inspect(site);

    println!("Checked {} file(s)", report.checked);
    for (path, reason) in &report.failures {
        println!("  error: {:?}: {}", path, reason);
    }
    for (kind, slug, files) in &report.duplicates {
        println!("  duplicate {} slug {:?}: {:?}", kind, slug, files);
    }

    if report.is_clean() {
        println!("No problems found.");
    } else if strict {
        anyhow::bail!(
            "{} unreadable file(s), {} duplicate slug(s)",
            report.failures.len(),
            report.duplicates.len()
        );
    }

    Ok(())
}
