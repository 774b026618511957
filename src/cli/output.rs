//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners and
//! formatted messages to the user.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an error to stderr with the error prefix
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
}

/// Print a numbered package name line
pub fn print_match_line(index: usize, name: &str) {
    println!("{index:>6}. \x1b[1m{name}\x1b[0m");
}

/// Print a rule line introducing one package's details
pub fn print_detail_rule(index: usize, name: &str) {
    println!("── {index}. \x1b[1m{name}\x1b[0m {}", "─".repeat(40));
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
