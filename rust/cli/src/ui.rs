//! UI helper functions for terminal output formatting.

use std::io::Write;

/// Width of the `=` rules around section headers.
pub const RULE_WIDTH: usize = 50;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// A title between two `=` rules.
pub fn write_banner(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}\n{}\n{}", rule, title, rule)
}

/// A short `=== TITLE ===` header.
pub fn write_section(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n=== {} ===", title)
}
