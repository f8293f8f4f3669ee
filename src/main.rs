use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use monthcal::calendar::bounds::DateBounds;
use monthcal::config;
use monthcal::date_math::CalendarDate;
use monthcal::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "monthcal")]
#[command(
    about = "Scrollable month-calendar date picker",
    long_about = "Scrollable month-calendar date picker\n\nOpens an interactive month view; arrow keys move the focused day,\nEnter selects it, Escape closes."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Initial selected date in YYYY-MM-DD format (optional)
    #[arg(short, long)]
    date: Option<String>,

    /// Earliest navigable date in YYYY-MM-DD format (optional)
    #[arg(long)]
    min_date: Option<String>,

    /// Latest navigable date in YYYY-MM-DD format (optional)
    #[arg(long)]
    max_date: Option<String>,

    /// Display current configuration and exit
    #[arg(long)]
    show_config: bool,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Parse a YYYY-MM-DD argument into a calendar date.
fn parse_date(s: &str) -> anyhow::Result<CalendarDate> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(anyhow!("expected YYYY-MM-DD, got '{}'", s));
    }
    let year: i32 = parts[0].parse().with_context(|| format!("bad year in '{}'", s))?;
    let month: u32 = parts[1].parse().with_context(|| format!("bad month in '{}'", s))?;
    let day: u32 = parts[2].parse().with_context(|| format!("bad day in '{}'", s))?;
    CalendarDate::from_ymd(year, month, day)
        .ok_or_else(|| anyhow!("'{}' is not a valid calendar date", s))
}

/// Display current configuration
fn handle_show_config() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("first_day_of_week: {}", cfg.first_day_of_week);
    println!("month_row_height_px: {}", cfg.month_row_height_px);
    println!("single_row_offset_px: {}", cfg.single_row_offset_px);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("focus_fg: {:?}", cfg.theme.focus_fg);
    println!("today_fg: {:?}", cfg.theme.today_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn resolve_dates(cli: &Cli) -> anyhow::Result<(Option<CalendarDate>, DateBounds)> {
    let initial = cli.date.as_deref().map(parse_date).transpose()?;
    let min = cli.min_date.as_deref().map(parse_date).transpose()?;
    let max = cli.max_date.as_deref().map(parse_date).transpose()?;
    Ok((initial, DateBounds { min, max }))
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    if cli.show_config {
        handle_show_config();
        return;
    }

    let (initial, bounds) = match resolve_dates(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = tui::run(config, initial, bounds).await {
        eprintln!("Error running TUI: {}", e);
        tracing::error!("TUI failed: {}", e);
        std::process::exit(1);
    }
}
