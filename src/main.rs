mod calc;
mod cmd;
mod data;
mod logging;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "calpick", about = "pick a date from a month calendar")]
struct Cli {
    /// Path to the data directory containing config.yaml and logs (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config.yaml
    Init,
    /// Print one month's grid
    Show {
        /// Month to print as YYYY-MM (default: current month)
        month: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    let _log_guard = logging::init(&data_dir)?;
    info!(data_dir = %data_dir.display(), "calpick {}", env!("CARGO_PKG_VERSION"));

    if wants_auto_init(&cli.command, &data_dir) {
        info!(data_dir = %data_dir.display(), "no config.yaml, running init");
        eprintln!(
            "Data directory '{}' has no config.yaml, running init...",
            data_dir.display()
        );
        cmd::init::init_dir(&data_dir, &mut std::io::stderr())?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Show { month, json }) => cmd::show::run(month.as_deref(), json),
    }
}

/// Returns true when `dir` has no config.yaml. The logs directory alone
/// does not count as initialized.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    !dir.join("config.yaml").exists()
}

/// Only the interactive picker auto-initializes; `show` and `init` must not.
fn wants_auto_init(command: &Option<Commands>, dir: &std::path::Path) -> bool {
    command.is_none() && dir_needs_init(dir)
}
