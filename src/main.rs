//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown content engine for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List content (projects, featured, posts, latest, writing)
    #[command(alias = "ls")]
    List {
        #[arg(default_value = "projects")]
        r#type: String,
    },

    /// Show a single entry by slug
    Show {
        /// Kind of entry (project, post, writing)
        kind: String,

        slug: String,

        /// Also print the body rendered to HTML
        #[arg(long)]
        html: bool,
    },

    /// Create a new project, post or writing file
    New {
        /// Kind of entry (project, post, writing)
        kind: String,

        /// Title of the new entry
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Print every collection
    Export {
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Report unreadable files and duplicate slugs
    Check {
        /// Exit with an error if anything is found
        #[arg(long)]
        strict: bool,
    },

    /// Serve the content as a JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let site = folio::Portfolio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { kind, slug, html } => {
            let site = folio::Portfolio::new(&base_dir)?;
            folio::commands::show::run(&site, &kind, &slug, html)?;
        }

        Commands::New { kind, title, slug } => {
            let site = folio::Portfolio::new(&base_dir)?;
            let path = folio::commands::new::create_entry(&site, &kind, &title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Export { format } => {
            let site = folio::Portfolio::new(&base_dir)?;
            folio::commands::export::run(&site, &format)?;
        }

        Commands::Check { strict } => {
            let site = folio::Portfolio::new(&base_dir)?;
            folio::commands::check::run(&site, strict)?;
        }

        Commands::Serve { port, ip } => {
            let site = folio::Portfolio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
