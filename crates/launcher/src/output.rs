//! Styled terminal output for command handlers

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Green check line for a completed step
pub fn success(msg: &str) {
    println!("{} {}", style("✔").green().bold(), msg);
}

/// Red cross line on stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✖").red().bold(), msg);
}

/// Yellow warning line on stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Neutral status line
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Section header, preceded by a blank line
pub fn header(msg: &str) {
    println!("\n{}", style(msg).cyan().bold());
}

/// Indented `key: value` line with a dimmed key
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", style(format!("{}:", key)).dim(), value);
}

/// Indented dash list item
pub fn item(msg: &str) {
    println!("  {} {}", style("-").dim(), msg);
}

/// Numbered step in a "next steps" listing
pub fn step(n: usize, msg: &str) {
    println!("   {} {}", style(format!("{}.", n)).bold(), msg);
}

/// Spinner with a steady tick for operations without progress reporting
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
