// xltemplates - bin/xltemplates-launch.rs
//
// Launcher entry point: resolves the port, starts the UI server headless on
// all interfaces, and exits with the server's outcome (0 or 1).

use clap::Parser;
use std::path::PathBuf;
use xltemplates::app::launcher;
use xltemplates::util;

/// Start the xltemplates server on 0.0.0.0 in headless mode.
#[derive(Parser, Debug)]
#[command(name = "xltemplates-launch", version, about)]
struct Cli {
    /// Port for the server. Invalid values fall back to 8501.
    #[arg(allow_hyphen_values = true)]
    port: Option<String>,

    /// Server executable (default: xltemplates next to this launcher).
    #[arg(long = "server-bin")]
    server_bin: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug, None);
    tracing::info!(version = util::constants::APP_VERSION, "Starting launcher");

    let port = launcher::resolve_port(cli.port.as_deref());
    let program = cli
        .server_bin
        .unwrap_or_else(launcher::default_server_program);

    let result = run(&program, port);
    if let Err(ref e) = result {
        tracing::error!(error = %e, "Error running the template server");
        eprintln!("Error running the template server: {e}");
    }
    std::process::exit(launcher::exit_code(&result));
}

fn run(program: &std::path::Path, port: u16) -> util::error::Result<()> {
    launcher::run_server(program, port)?;
    Ok(())
}
