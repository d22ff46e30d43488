//! Colored terminal output
//!
//! Uses owo-colors for terminal colors and indicatif for spinners.

use crate::error::LookupError;
use crate::lookup::LookupEntry;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

/// Command names and argument hints shown by `help`.
const USAGE: &[(&str, &str)] = &[
    ("search", "<search terms>"),
    ("show", "<idx|id>"),
    ("import", "<idx|id>"),
    ("describe", "<idx|id>"),
];

/// Print an action header (blue, bold)
/// Example: "==> Recipe 577478"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed)
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print one lookup result
/// Example: "   3: binary search tree ..."
pub fn list_entry(entry: &LookupEntry) {
    let line = entry.display_line();
    match line.split_once(": ") {
        Some((index, rest)) => println!(" {:>3}: {}", index.magenta(), rest),
        None => println!(" {line}"),
    }
}

/// Print recipe source with a dimmed gutter
pub fn code(source: &str) {
    let width = source.lines().count().max(1).to_string().len();
    for (n, line) in source.lines().enumerate() {
        println!("{} {}", format!("{:>width$} │", n + 1).dimmed(), line);
    }
}

/// Print command usage. `place` is left out since the terminal cannot
/// pre-fill input.
pub fn usage() {
    for (name, args) in USAGE {
        println!("  {:<10}{}", name.magenta(), args);
    }
}

/// Print a command failure. Conflicts and unsupported features are warnings.
pub fn diagnostic(err: &LookupError) {
    match err {
        LookupError::StateConflict { name } => {
            warning(&err.to_string());
            eprintln!("{} del {}", "suggest:".cyan().bold(), name);
        }
        LookupError::UnsupportedMode(_) => warning(&err.to_string()),
        other => error(&format!("{}: {}", other.kind(), other)),
    }
}

/// Spinner for a network call; hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner and clear it
pub fn progress_done(pb: ProgressBar) {
    pb.finish_and_clear();
}
