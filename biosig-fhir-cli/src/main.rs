// biosig-fhir-cli/src/main.rs
mod models;
mod rendering;

use anyhow::{Context, Result};
use colored::*;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use biosig_fhir_core::{
    decode_header, ConversionRequest, FailurePolicy, HeaderSummary, ToolInvoker, ToolMode,
    ToolsConfig,
};

use crate::models::cli::Cli;
use crate::rendering::{summary_line, write_header, write_template};

use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{
    fmt::{self, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const CONFIG_FILENAME: &str = "BiosigFhir.toml";
const LOG_FILE_NAME: &str = "biosig-fhir.log";

/// Walks up from `start` looking for `BiosigFhir.toml`.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

fn load_tools_config(cli: &Cli) -> Result<ToolsConfig> {
    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let current_dir = env::current_dir().context("Failed to get current directory")?;
            find_config_file(&current_dir)
        }
    };

    let mut config = match config_path {
        Some(path) => {
            info!("Using configuration file at: {:?}", path);
            ToolsConfig::from_file(&path)?
        }
        None => {
            info!("No {} found, using default tool configuration.", CONFIG_FILENAME);
            ToolsConfig::default()
        }
    };

    if cli.strict {
        config.failure_policy = FailurePolicy::Strict;
    }
    debug!(config = ?config, "Effective tool configuration");
    Ok(config)
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "-"]));
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Runs one mode and writes its result to `writer`.
fn run_step<W: Write>(
    writer: &mut W,
    invoker: &ToolInvoker,
    file: &Path,
    mode: ToolMode,
) -> Result<()> {
    let request = ConversionRequest::new(file, mode);
    let pb = spinner(format!(
        "Running {} {} ...",
        invoker.tool_for(mode),
        mode.flag()
    ));
    let result = invoker.fetch(&request);
    pb.finish_and_clear();

    let output = match result {
        Ok(output) => output,
        Err(e) if e.is_spawn_failure() => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to produce {} output (is '{}' installed and on PATH or in tool_dir?)",
                    mode,
                    invoker.tool_for(mode)
                )
            });
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to produce {} output", mode)),
    };

    match mode {
        ToolMode::Header => {
            let header = decode_header(&output.stdout);
            if let Some(value) = &header {
                eprintln!("{}", summary_line(&HeaderSummary::from_value(value)));
            }
            write_header(writer, header.as_ref())?;
        }
        _ => write_template(writer, &output.stdout)?,
    }
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Runs every selected mode in order. Returns `Ok(false)` if any step failed.
fn run<W: Write>(writer: &mut W, cli: &Cli) -> Result<bool> {
    let config = load_tools_config(cli)?;
    let invoker = ToolInvoker::new(config);

    let mut all_ok = true;
    for mode in cli.selected_modes() {
        info!(mode = %mode, file = %cli.file.display(), "Running export step.");
        if let Err(e) = run_step(writer, &invoker, &cli.file, mode) {
            debug!("{} step failed: {:#}", mode, e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            all_ok = false;
        }
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    // Ensure colored output is enabled for early errors
    colored::control::set_override(true);

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Logging Setup ---
    let default_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default_level.into()));

    let log_dir = match dirs::cache_dir()
        .or_else(dirs::runtime_dir)
        .or_else(|| Some(env::temp_dir()))
        .map(|d| d.join("biosig-fhir"))
    {
        Some(dir) => dir,
        None => {
            eprintln!("{}", "Error: Could not determine a suitable directory for log files.".red());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("{} Failed to create log directory {}: {}", "Error:".red(), log_dir.display(), e);
        return ExitCode::FAILURE;
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let time_format_desc = match time::format_description::parse(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]",
    ) {
        Ok(desc) => desc,
        Err(e) => {
            eprintln!("{} Failed to parse log time format: {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };
    let local_timer = LocalTime::new(time_format_desc);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_writer)
        .with_ansi(false) // No colors in file
        .with_target(true)
        .with_line_number(true)
        .with_timer(local_timer.clone());

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(local_timer)
        .with_target(false)
        .with_level(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("{} Failed to initialize logging: {}", "Error:".red(), e);
        return ExitCode::FAILURE;
    }
    colored::control::unset_override();

    info!(
        "Logging initialized. Level determined by RUST_LOG or -v flags (default: {}). Logging to stderr and {}",
        default_level,
        log_path.display()
    );
    // --- End Logging Setup ---

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match run(&mut handle, &cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
