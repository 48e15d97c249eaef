//! Shared output helpers.

use anyhow::Result;
use console::{Style, style};
use serde::Serialize;
use serde_json::Value;

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a bold title followed by a dim rule.
pub fn print_header(title: &str) {
    let dim = Style::new().dim();
    println!();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(60)));
}

/// Print a dim label with its value.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    let dim = Style::new().dim();
    println!("  {} {}", dim.apply_to(format!("{:<14}", label)), value);
}

/// Render a field of a JSON object as display text.
///
/// `path` walks nested objects, so `["titulo", "simbolo"]` reads
/// `value.titulo.simbolo`; an empty path renders `value` itself. Missing or
/// null fields render as `-`.
pub fn field(value: &Value, path: &[&str]) -> String {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return "-".to_string(),
        }
    }

    match current {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_amount(f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Truncate a string to a maximum number of characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
