//! Output formatting for CLI commands.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// Print rows in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

/// Print a single item as JSON regardless of format.
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print bare lines, one value per line.
pub fn print_lines<T: Serialize + AsRef<str>>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            for line in data {
                println!("{}", line.as_ref());
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

/// Render a validity flag for tables.
pub fn display_valid(valid: &bool) -> String {
    if *valid {
        "valid".green().to_string()
    } else {
        "invalid".red().to_string()
    }
}

/// Render an optional cell for tables.
pub fn display_option<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".dimmed().to_string())
}
