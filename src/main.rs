//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::theme::ThemeAction;
use folio::theme::Theme;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A small Markdown blog with hash routing, tag filtering and theming", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// File name under the posts directory (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, page)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the view a fragment routes to
    #[command(alias = "r")]
    Render {
        /// URL fragment, e.g. "#/posts/welcome"
        #[arg(default_value = "")]
        fragment: String,

        /// Include the full page shell
        #[arg(short, long)]
        full: bool,
    },

    /// Start the preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Show or change the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the stored theme
    Get,
    /// Store a theme
    Set {
        /// light or dark
        theme: String,
    },
    /// Switch between light and dark
    Toggle,
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
            tracing::info!("Initializing blog in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, tags, path } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let file = folio::commands::new::create_post(&site, &title, &tags, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type).await?;
        }

        Commands::Render { fragment, full } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::render::run(&site, &fragment, full).await?;
        }

        Commands::Server { port, ip, open } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port, open).await?;
        }

        Commands::Theme { action } => {
            let site = folio::Folio::new(&base_dir)?;
            let action = match action.unwrap_or(ThemeCommand::Get) {
                ThemeCommand::Get => ThemeAction::Get,
                ThemeCommand::Set { theme } => {
                    let theme: Theme = theme.parse().map_err(anyhow::Error::msg)?;
                    ThemeAction::Set(theme)
                }
                ThemeCommand::Toggle => ThemeAction::Toggle,
            };
            folio::commands::theme::run(&site, action)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
