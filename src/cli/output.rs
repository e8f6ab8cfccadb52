//! Shared CLI output helpers.
//!
//! Status messages go to stderr so command data on stdout (a blob, a list)
//! can be piped. Colors come from `console` and are off under `NO_COLOR`.
//!
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, keys, hints
//! - Dim: secondary info

use std::fmt::Display;

use console::style;

/// Print a success message with checkmark.
///
/// Example: `✓ captured 2 files`
pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green().for_stderr(), msg);
}

/// Print an error message.
///
/// Example: `✗ no .env files found`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a warning message.
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().for_stderr(), msg);
}

/// Print a hint message.
///
/// Example: `→ run envi capture first`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").cyan().for_stderr(),
        style(msg).cyan().for_stderr()
    );
}

/// Print an informational line.
pub fn info(msg: &str) {
    eprintln!("{}", msg);
}

/// Print a dimmed, secondary line.
pub fn dimmed(msg: &str) {
    eprintln!("{}", style(msg).dim().for_stderr());
}

/// Print a key-value pair.
///
/// Example: `  store  ~/.envi/store/app.toml`
pub fn kv(label: &str, value: impl Display) {
    eprintln!(
        "  {}  {}",
        style(label).dim().for_stderr(),
        style(value).bold().for_stderr()
    );
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    eprintln!("  • {}", item);
}

/// Format a path for inline use.
pub fn path(p: impl Display) -> String {
    style(p).cyan().for_stderr().to_string()
}

/// Format a variable name for inline use.
pub fn key(k: &str) -> String {
    style(k).cyan().for_stderr().to_string()
}

/// Format a command for inline use.
pub fn cmd(c: &str) -> String {
    style(c).green().for_stderr().to_string()
}

/// `1 file` / `3 files`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
