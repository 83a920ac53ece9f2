//! red - a small full-screen terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! red notes.txt
//! red --palette 16 notes.txt
//! red --log-file red.log --perf notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use red::app::App;
use red::config::{
    ConfigFlags, PaletteMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use red::perf;

/// A small full-screen terminal text editor
#[derive(Parser, Debug)]
#[command(name = "red", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if it doesn't exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Log timing of startup and frame drawing
    #[arg(long)]
    perf: bool,

    /// Write log records to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Color palette
    #[arg(long, value_enum)]
    palette: Option<PaletteMode>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
}

fn init_logging(log_file: Option<&Path>, perf: bool) -> Result<()> {
    let filter = if perf {
        env_filter().add_directive(
            "red::perf=info"
                .parse()
                .context("Invalid perf log directive")?,
        )
    } else {
        env_filter()
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref(), effective.perf)?;
    perf::set_enabled(effective.perf);

    let palette = effective.palette.unwrap_or(PaletteMode::Auto).resolve();
    tracing::debug!(?palette, file = ?cli.file, "starting");

    App::new(cli.file)
        .with_palette(palette)
        .run()
        .context("Editor error")
}
