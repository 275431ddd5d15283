//! List site content

use anyhow::Result;

use crate::content::{BlogPost, Project, WritingPost};
use crate::helpers::short_date;
use crate::Portfolio;

/// List site content by type
pub fn run(site: &Portfolio, content_type: &str) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "project" | "projects" => {
            let projects = loader.projects();
            println!("Projects ({}):", projects.len());
            for project in &projects {
                println!("{}", project_line(project));
            }
        }
        "featured" => {
            let projects = loader.featured_projects();
            println!("Featured projects ({}):", projects.len());
            for project in &projects {
                println!("{}", project_line(project));
            }
        }
        "post" | "posts" | "knowledge" => {
            let posts = loader.posts();
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("{}", post_line(post));
            }
        }
        "latest" => match loader.latest_post() {
            Some(post) => {
                println!("{}", post_line(&post));
                println!("    {}", post.excerpt);
            }
            None => println!("No posts yet."),
        },
        "writing" => {
            let writing = loader.writing();
            println!("Writing ({}):", writing.len());
            for piece in &writing {
                println!("{}", writing_line(piece));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: projects, featured, posts, latest, writing",
                content_type
            );
        }
    }

    Ok(())
}

fn project_line(project: &Project) -> String {
    format!(
        "  {:>4}  {} ({}){} [{}]",
        project.order,
        project.title,
        project.category,
        if project.featured { " *" } else { "" },
        project.slug
    )
}

fn post_line(post: &BlogPost) -> String {
    let tags = post
        .tags
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|t| format!(" #{}", t.join(" #")))
        .unwrap_or_default();
    format!(
        "  {} - {}{} [{}]",
        short_date(&post.date),
        post.title,
        tags,
        post.slug
    )
}

fn writing_line(piece: &WritingPost) -> String {
    format!(
        "  {} - {} [{}]",
        short_date(&piece.date),
        piece.title,
        piece.slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ProjectCategory;
    use std::path::PathBuf;

    #[test]
    fn test_project_line() {
        let project = Project {
            slug: "tracker".to_string(),
            title: "Tracker".to_string(),
            category: ProjectCategory::Ideation,
            description: String::new(),
            thumbnail: String::new(),
            featured: true,
            order: 2,
            date: None,
            figma_link: None,
            mvp_link: None,
            slides: None,
            source: PathBuf::new(),
        };
        assert_eq!(project_line(&project), "     2  Tracker (Ideation) * [tracker]");
    }

    #[test]
    fn test_post_line_with_tags() {
        let post = BlogPost {
            slug: "notes".to_string(),
            title: "Notes".to_string(),
            date: "2024-06-01T10:00:00Z".to_string(),
            excerpt: String::new(),
            category: None,
            tags: Some(vec!["ux".to_string(), "research".to_string()]),
            source: PathBuf::new(),
        };
        assert_eq!(post_line(&post), "  2024-06-01 - Notes #ux #research [notes]");
    }

    #[test]
    fn test_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();
        assert!(run(&site, "tags").is_err());
        assert!(run(&site, "projects").is_ok());
    }
}
