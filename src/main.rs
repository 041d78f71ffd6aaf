//! Markpad - A terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markpad
//! markpad notes.md
//! markpad --name draft --export-dir out/
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markpad::app::App;
use markpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use markpad::perf;

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    /// Markdown file to load into the editor
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Base name for exports (`.md` is appended)
    #[arg(long, value_name = "BASE")]
    name: Option<String>,

    /// Directory exports are written into
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Start with the preview pane hidden
    #[arg(long)]
    no_preview: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render pipeline events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

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
    tracing::debug!(?effective, "resolved flags");

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("MARKPAD_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    // Run the application
    let mut app = App::new(cli.file)
        .with_file_name(effective.name.clone())
        .with_export_dir(
            effective
                .export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        )
        .with_preview_visible(!effective.no_preview)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    let outcome = app.run();
    eprint!("{}", perf::report());
    outcome.context("Application error")
}
