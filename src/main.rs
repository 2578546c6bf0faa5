use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use dsel::app::App;
use dsel::config::Config;
use dsel::error::{SelectorError, SelectorResult};

const LOG_FILTER_ENV: &str = "DSEL_LOG";

/// Pick records from a JSON list in the terminal and print the saved keys.
#[derive(Debug, Parser)]
#[command(name = "dsel", version, about, long_about = None)]
struct Cli {
    /// Config file, instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with an array of records
    #[arg(long)]
    data: Option<PathBuf>,

    /// Row template, e.g. "[[%:name%]] <%:email%>"
    #[arg(long)]
    template: Option<String>,

    #[arg(long)]
    saved_key: Option<String>,

    #[arg(long)]
    show_key: Option<String>,

    /// Fields searched while typing, comma separated
    #[arg(long, value_delimiter = ',')]
    filter_key: Vec<String>,

    /// Selection cap; zero or negative means unbounded
    #[arg(long, allow_negative_numbers = true)]
    max_data: Option<i64>,

    #[arg(long)]
    max_result: Option<usize>,

    /// Keep the active row inside a scrolling window
    #[arg(long)]
    scroll: bool,

    /// Initial selection in serialized form, e.g. "1;3;"
    #[arg(long)]
    value: Option<String>,

    /// Keymap preset: default or emacs
    #[arg(long)]
    keymap: Option<String>,

    #[arg(long)]
    debug_status: bool,

    /// Write logs to this file; filtered by DSEL_LOG
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> SelectorResult<()> {
    init_logging(cli.log.as_deref())?;

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    apply_overrides(&cli, &mut config);

    let mut app = App::new_with_config(config)?;
    if let Some(value) = cli.value.as_deref() {
        let loaded = app.selector.load_value(value);
        tracing::info!(loaded, "initial value loaded");
    }

    app.run()?;
    println!("{}", app.finish());
    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    let selector = &mut config.selector;
    if let Some(template) = &cli.template {
        selector.template = template.clone();
    }
    if let Some(saved_key) = &cli.saved_key {
        selector.saved_key = Some(saved_key.clone());
    }
    if let Some(show_key) = &cli.show_key {
        selector.show_key = Some(show_key.clone());
    }
    if !cli.filter_key.is_empty() {
        selector.filter_key = cli.filter_key.clone();
    }
    if let Some(max_data) = cli.max_data {
        selector.max_data = max_data;
    }
    if let Some(max_result) = cli.max_result {
        selector.max_result = max_result;
    }
    if cli.scroll {
        selector.result_scroll = true;
    }

    if let Some(data) = &cli.data {
        config.source.data_path = Some(data.clone());
    }
    if let Some(preset) = &cli.keymap {
        config.keymap.preset = preset.clone();
    }
    if cli.debug_status {
        config.ui.debug_status_visible = true;
    }
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> SelectorResult<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| {
        SelectorError::io_with_context(
            source,
            format!("failed to open log file: {}", path.display()),
        )
    })?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
