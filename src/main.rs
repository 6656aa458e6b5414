//! CLI entry point for mdlab

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdlab::{commands, Lab, Mode};

#[derive(Parser)]
#[command(name = "mdlab")]
#[command(version)]
#[command(about = "Inspect a directory of markdown lab notes", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Hide drafts, as a production build would
    #[arg(long, global = true)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site information
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, slug)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a rendered post
    Show {
        slug: String,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// List posts carrying a tag
    Tag { tag: String },

    /// List the newest posts
    Latest {
        /// Number of posts (defaults to latest_limit from the config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List one page of posts
    Page {
        /// 1-based page number
        #[arg(default_value = "1")]
        page: usize,

        /// Posts per page (defaults to per_page from the config)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdlab=debug,info"
    } else {
        "mdlab=info"
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
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let mode = if cli.production {
        Some(Mode::Production)
    } else {
        Mode::from_env()
    };

    match cli.command {
        Commands::List { r#type } => {
            let store = open(&base_dir, mode)?.store();
            commands::list::run(&store, &r#type).await?;
        }

        Commands::Show { slug, json } => {
            let store = open(&base_dir, mode)?.store();
            commands::show::run(&store, &slug, json).await?;
        }

        Commands::Tag { tag } => {
            let store = open(&base_dir, mode)?.store();
            commands::list::tagged(&store, &tag).await?;
        }

        Commands::Latest { limit } => {
            let lab = open(&base_dir, mode)?;
            let limit = limit.unwrap_or(lab.config.latest_limit);
            commands::list::latest(&lab.store(), limit).await?;
        }

        Commands::Page { page, per_page } => {
            let lab = open(&base_dir, mode)?;
            let per_page = per_page.unwrap_or(lab.config.per_page);
            commands::list::page(&lab.store(), page, per_page).await?;
        }

        Commands::New { title, draft } => {
            let lab = open(&base_dir, mode)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = lab.new_post(&title, draft)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("mdlab version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn open(base_dir: &Path, mode: Option<Mode>) -> Result<Lab> {
    let lab = Lab::new(base_dir, mode)?;
    tracing::debug!(
        "Content directory {:?} ({:?} mode)",
        lab.config.content_dir,
        lab.config.mode
    );
    Ok(lab)
}
