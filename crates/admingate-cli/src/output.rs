//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One `key = value` row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Entry {
    /// Dotted key
    pub key: String,
    /// Rendered value
    pub value: String,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single item: as `key: value` lines or as JSON.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    let value = serde_json::to_value(item).unwrap_or(serde_json::Value::Null);
    match format {
        OutputFormat::Table => {
            for entry in flatten(&value) {
                print_kv(&entry.key, &entry.value);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Flattens nested JSON objects into dotted-key rows.
pub fn flatten(value: &serde_json::Value) -> Vec<Entry> {
    let mut entries = Vec::new();
    flatten_into("", value, &mut entries);
    entries
}

fn flatten_into(prefix: &str, value: &serde_json::Value, out: &mut Vec<Entry>) {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&key, child, out);
            }
        }
        Value::String(s) => out.push(Entry {
            key: prefix.to_string(),
            value: s.clone(),
        }),
        Value::Null => out.push(Entry {
            key: prefix.to_string(),
            value: "-".to_string(),
        }),
        other => out.push(Entry {
            key: prefix.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}
