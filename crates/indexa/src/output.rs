//! Output formatting: table, JSON, YAML, plain, plus stderr notifications.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use indexa_core::{BadgeTone, Notification, NotificationLevel, Notifier, StatusBadge};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Badge label, tinted by tone when color is on.
pub fn paint_badge(badge: StatusBadge, color: bool) -> String {
    if !color {
        return badge.label.to_owned();
    }
    let label = badge.label;
    match badge.tone {
        BadgeTone::Amber => label.yellow().to_string(),
        BadgeTone::Orange => label.truecolor(255, 140, 0).to_string(),
        BadgeTone::Green => label.green().to_string(),
        BadgeTone::Red => label.red().to_string(),
        BadgeTone::Slate => label.bright_black().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact` / `yaml`: serializes the original data
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single item. Table mode uses `detail_fn`, since detail views
/// are key/value blocks rather than rows.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// `-` for missing values in detail views and table cells.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn join_or_dash(values: Option<&[String]>) -> String {
    match values {
        Some(v) if !v.is_empty() => v.join(", "),
        _ => "-".into(),
    }
}

pub fn fmt_time(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

// ── Notifications ────────────────────────────────────────────────────

/// Prints mutation outcomes to stderr.
pub struct TerminalNotifier {
    quiet: bool,
    color: bool,
}

impl TerminalNotifier {
    pub fn new(quiet: bool, color: bool) -> Self {
        Self { quiet, color }
    }

    fn format(&self, n: &Notification) -> String {
        let line = match n.description.as_deref() {
            Some(description) => format!("{}: {description}", n.title),
            None => n.title.clone(),
        };
        match (n.level, self.color) {
            (NotificationLevel::Success, true) => format!("{} {line}", "✓".green()),
            (NotificationLevel::Success, false) => format!("✓ {line}"),
            (NotificationLevel::Error, true) => format!("{} {line}", "✗".red()),
            (NotificationLevel::Error, false) => format!("✗ {line}"),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        if self.quiet {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", self.format(&notification));
    }
}
