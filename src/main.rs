//! proxy-render: render reverse-proxy configuration from a template.
//!
//! # Pipeline
//!
//! ```text
//!   settings.toml ──▶ config::load_settings ──▶ RenderSettings
//!                                                   │
//!   haproxy.tmpl ───▶ TemplateHandle::compile ◀─────┘   (once, fatal on error)
//!                              │
//!   config.json ──▶ Renderer::render ──▶ Normalizer ──▶ stdout / --output
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use proxy_render::config::{self, RenderSettings};
use proxy_render::observability::logging;
use proxy_render::template::{Normalizer, Renderer, TemplateHandle};

#[derive(Parser)]
#[command(name = "proxy-render")]
#[command(about = "Render reverse-proxy configuration from a template", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Template file, overrides template.path.
    #[arg(short, long, global = true)]
    template: Option<PathBuf>,

    /// Template name, overrides template.name.
    #[arg(short, long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a configuration object into a proxy configuration
    Render {
        /// Configuration object (.json or .toml)
        #[arg(short, long)]
        config: PathBuf,

        /// Output file; stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate settings and compile the template without rendering
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => config::load_settings(path)?,
        None => RenderSettings::default(),
    };
    settings.apply_overrides(cli.template, cli.name);

    logging::init(&settings.logging);
    tracing::info!("proxy-render v{} starting", env!("CARGO_PKG_VERSION"));

    let handle = match TemplateHandle::compile(&settings.template.name, &settings.template.path) {
        Ok(handle) => Arc::new(handle),
        Err(e) => {
            tracing::error!(error = %e, "Cannot compile template");
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Check => {
            tracing::info!(template = %handle.name(), "Template OK");
        }
        Commands::Render { config: config_path, output } => {
            let document = config::load_document(&config_path)?;
            let mut renderer = Renderer::new(handle, Normalizer::from(&settings.normalizer));
            let artifact = renderer.render(&document).await?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &artifact).await?;
                    tracing::info!(
                        template = %renderer.handle().name(),
                        path = %path.display(),
                        bytes = artifact.len(),
                        "Configuration written"
                    );
                }
                None => {
                    use tokio::io::AsyncWriteExt;
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&artifact).await?;
                    stdout.flush().await?;
                }
            }
        }
    }

    Ok(())
}
