//! chub-tagger - tag film scans with CameraHub catalog metadata
//!
//! For every JPEG scan: work out which negative it shows, register the scan
//! in the catalog, translate the catalog record into EXIF tags and store the
//! tags after confirmation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chub_common::config::{default_config_path, load_toml_config, resolve_server};
use chub_common::tags::mapping_table;
use chub_tagger::client::{CameraHubClient, Catalog};
use chub_tagger::console::ConsoleInteraction;
use chub_tagger::files::discover_images;
use chub_tagger::setup::{configured_log_level, create_config, log_filter};
use chub_tagger::{SidecarStore, Tagger, TaggerOptions};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for chub-tagger
#[derive(Parser, Debug)]
#[command(name = "chub-tagger")]
#[command(about = "Tag film scans with metadata from CameraHub")]
#[command(version)]
struct Args {
    /// Search for scans recursively
    #[arg(short, long)]
    recursive: bool,

    /// Don't prompt to identify scans, only guess from the filename
    #[arg(short, long)]
    auto: bool,

    /// Accept all changes
    #[arg(short, long)]
    yes: bool,

    /// Don't write any tags
    #[arg(short, long)]
    dry_run: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image file to be tagged
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// CameraHub server to connect to (overrides CHUB_SERVER and config)
    #[arg(short, long)]
    server: Option<String>,

    /// Print the field → EXIF tag mapping and exit
    #[arg(long)]
    list_tags: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_tags {
        for (field, tag) in mapping_table() {
            println!("{:<24} {}", field, tag);
        }
        return Ok(());
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    // Initialize tracing before anything that logs: RUST_LOG wins over the configured level
    let level = configured_log_level(&config_path);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(&level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("chub-tagger {}", env!("CARGO_PKG_VERSION"));

    if !config_path.exists() {
        let stdin = std::io::stdin();
        create_config(
            &config_path,
            args.server.as_deref(),
            &mut stdin.lock(),
            &mut std::io::stdout(),
            || rpassword::prompt_password("Enter CameraHub password: "),
        )
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    }
    let config = load_toml_config(&config_path).context("Failed to load config")?;
    info!("Config: {}", config_path.display());

    let server = resolve_server(args.server.as_deref(), &config);
    info!("Server: {}", server);

    let client = CameraHubClient::new(&server, &config.username, &config.password)
        .context("Failed to create catalog client")?;

    match client.check_credentials().await {
        Ok(true) => info!("Credentials OK"),
        Ok(false) => warn!("Credentials not accepted by {}", server),
        Err(e) => warn!("Could not check credentials: {}", e),
    }

    let files = match &args.file {
        Some(file) => vec![file.clone()],
        None => discover_images(Path::new("."), args.recursive),
    };
    if files.is_empty() {
        info!("No files found");
        return Ok(());
    }

    let options = TaggerOptions {
        auto: args.auto,
        yes: args.yes,
        dry_run: args.dry_run,
    };
    let mut tagger = Tagger::new(client, SidecarStore::new(), ConsoleInteraction::stdio(), options);
    let summary = tagger.run(&files).await;

    if summary.failed > 0 {
        warn!("{} file(s) could not be tagged", summary.failed);
    }
    Ok(())
}
