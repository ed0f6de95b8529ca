//! Community Dashboard CLI
//!
//! - `render`: resolve the data document and write every widget as JSON
//! - `serve`: run the HTTP API
//! - `defaults`: print the built-in data document
//! - `config`: print a default configuration file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use community_dashboard::config::{generate_default_config, Config, LoadedConfig, LoggingConfig};
use community_dashboard::model::{self, defaults};
use community_dashboard::render::{render_static, DashboardState};
use community_dashboard::source::{DocumentLoader, SourceDocument};
use community_dashboard::{api, AppState};

#[derive(Parser)]
#[command(name = "community-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Community impact dashboard resolver")]
#[command(long_about = "Resolves a town statistics snapshot into chart, map and text widget configurations.\nMissing or partial data falls back to built-in defaults field by field.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data document path or URL, overriding the config
    #[arg(short, long, global = true)]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the dashboard and write the render bundle
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the resolved dashboard over HTTP
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the built-in data document
    Defaults {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let LoadedConfig {
        mut config,
        notices,
    } = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(source) = cli.source {
        config.source.location = source;
    }

    init_tracing(&config.logging);
    for notice in &notices {
        notice.log();
    }

    match cli.command {
        Commands::Render { output } => {
            let state = load_dashboard(&config).await?;
            let bundle = render_static(Arc::new(state));
            let json = bundle.to_json_pretty()?;
            write_output(output.as_deref(), &json)?;
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }

            tracing::info!(
                "Starting Community Dashboard API v{}",
                env!("CARGO_PKG_VERSION")
            );
            let state = load_dashboard(&config).await?;
            api::serve(AppState::new(Arc::new(state)), &config.api).await?;
        }

        Commands::Defaults { output } => {
            let document = SourceDocument::from(&defaults::view_model());
            let json = serde_json::to_string_pretty(&document)?;
            write_output(output.as_deref(), &json)?;
        }

        Commands::Config { output } => {
            write_output(output.as_deref(), &generate_default_config())?;
        }
    }

    Ok(())
}

/// Fetch the document once and build the dashboard state
async fn load_dashboard(config: &Config) -> anyhow::Result<DashboardState> {
    let loader =
        DocumentLoader::new(config.source.timeout()).context("Failed to create HTTP client")?;
    let outcome = loader.load(&config.source.location()).await;

    let view_model = model::resolve(outcome.document.as_ref());
    Ok(DashboardState::build(view_model, outcome.origin, &config.map))
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Logs go to stderr so that stdout stays clean JSON
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("community_dashboard={},tower_http=info", logging.level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
