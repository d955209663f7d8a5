// xltemplates - main.rs
//
// UI server entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. actix-web server launch

use clap::Parser;
use std::path::PathBuf;
use xltemplates::app::page::PageConfig;
use xltemplates::platform::config::{self, PlatformPaths};
use xltemplates::ui::server::{self, ServerSettings};
use xltemplates::util;

/// xltemplates - Excel template selector & downloader.
///
/// Serves every .xlsx/.xls file in the template folder (and its immediate
/// subfolders) as a downloadable item, grouped by folder.
#[derive(Parser, Debug)]
#[command(name = "xltemplates", version, about)]
struct Cli {
    /// Address to bind (default from config.toml, else 127.0.0.1).
    #[arg(long)]
    address: Option<String>,

    /// Port to listen on (default from config.toml, else 8501).
    #[arg(long)]
    port: Option<u16>,

    /// Template folder (default: Excel_templates next to this executable).
    #[arg(short = 'r', long = "root")]
    root: Option<PathBuf>,

    /// Do not open the UI in a browser after starting.
    #[arg(long)]
    headless: bool,

    /// Directory containing config.toml (default: platform config directory).
    #[arg(long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_dir);
    let (app_config, config_warnings) = config::load_config(&config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "xltemplates starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let settings = ServerSettings {
        address: cli.address.unwrap_or(app_config.address),
        port: cli.port.unwrap_or(app_config.port),
        root: cli
            .root
            .or(app_config.templates_dir)
            .unwrap_or_else(config::default_templates_dir),
        headless: cli.headless,
        page: PageConfig::default(),
    };

    if let Err(e) = run(settings).await {
        tracing::error!(error = %e, "Server terminated");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(settings: ServerSettings) -> util::error::Result<()> {
    server::serve(settings).await?;
    Ok(())
}
