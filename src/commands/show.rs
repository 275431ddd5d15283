//! Show a single entry

use anyhow::Result;
use serde::Serialize;

use crate::content::Document;
use crate::Portfolio;

/// Print one entry's record, and its rendered body with `html`
pub fn run(site: &Portfolio, kind: &str, slug: &str, html: bool) -> Result<()> {
    let loader = site.loader();

    let output = match kind {
        "project" => describe(site, loader.project(slug), html)?,
        "post" => describe(site, loader.post(slug), html)?,
        "writing" => describe(site, loader.writing_post(slug), html)?,
        _ => anyhow::bail!("Unknown kind: {}. Available: project, post, writing", kind),
    };

    match output {
        Some(text) => print!("{}", text),
        None => anyhow::bail!("No {} with slug {:?}", kind, slug),
    }

    Ok(())
}

fn describe<T: Serialize>(
    site: &Portfolio,
    doc: Option<Document<T>>,
    html: bool,
) -> Result<Option<String>> {
    let Some(doc) = doc else {
        return Ok(None);
    };

    let mut out = serde_yaml::to_string(&doc.meta)?;
    if html {
        out.push_str("---\n");
        out.push_str(&doc.render(&site.renderer()));
    }
    Ok(Some(out))
}
