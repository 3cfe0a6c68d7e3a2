//! Status lines printed around the registry report
//!
//! Confirmations go to stdout next to the report's passes; problems go to
//! stderr next to its failures.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Apply the report's color decision to status lines on both streams
pub fn set_color(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print `name  version` rows under a title, names padded to one column
pub fn versions(title: &str, rows: &[(String, String)]) {
    println!("\n{}", style(title).bold().underlined());
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, version) in rows {
        println!(
            "  {}  {}",
            style(format!("{:<width$}", name, width = width)).dim(),
            version
        );
    }
}

/// Spinner for the live URL checks; hidden when stderr is not a terminal
pub fn spinner(msg: &str) -> ProgressBar {
    if !console::user_attended_stderr() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg} [{elapsed}]") {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}
