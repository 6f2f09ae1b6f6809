//! CLI entry point for postdeck

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postdeck::{commands, server, Site};

#[derive(Parser)]
#[command(name = "postdeck")]
#[command(version = "0.1.0")]
#[command(about = "Index, search and preview a directory of markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the new post
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build the post index
    #[command(alias = "b")]
    Build {
        /// Rebuild whenever a post changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Search the post index
    Search {
        /// Search text
        #[arg(default_value = "")]
        query: String,

        /// Only search posts with this tag ("all" for every post)
        #[arg(short, long)]
        tag: Option<String>,

        /// Read queries from stdin as you type
        #[arg(short, long)]
        interactive: bool,
    },

    /// Render a single post
    Show {
        /// Post file name, e.g. 2024-01-15-hello.md
        file: Option<String>,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Disable rebuilding on file changes
        #[arg(long)]
        r#static: bool,
    },

    /// Show or change the theme preference
    Theme {
        /// light, dark or toggle
        action: Option<String>,
    },

    /// Remove the generated index
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdeck=debug,info"
    } else {
        "postdeck=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            commands::new::create_post(&site, &title, path.as_deref())?;
        }

        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            let posts = site.build()?;
            println!("Indexed {} posts.", posts.len());

            if watch {
                tokio::task::spawn_blocking(move || {
                    commands::build::watch(&site, |posts| {
                        println!("Indexed {} posts.", posts.len());
                    })
                })
                .await??;
            }
        }

        Commands::Search {
            query,
            tag,
            interactive,
        } => {
            let site = Site::new(&base_dir)?;
            if interactive {
                commands::search::run_interactive(&site).await?;
            } else {
                commands::search::run(&site, &query, tag.as_deref()).await?;
            }
        }

        Commands::Show { file } => {
            let site = Site::new(&base_dir)?;
            commands::show::run(&site, file.as_deref()).await?;
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = Site::new(&base_dir)?;

            // Build first
            tracing::info!("Building post index...");
            site.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Theme { action } => {
            let site = Site::new(&base_dir)?;
            commands::theme::run(&site, action.as_deref())?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Removing post index...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("postdeck version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
