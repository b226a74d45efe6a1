//! User-facing status lines. Diagnostics go through `tracing` instead.

use colored::{Color, Colorize};

fn color_enabled() -> bool {
    std::env::var("OTW_NO_COLOR").is_err() && std::env::var("NO_COLOR").is_err()
}

fn paint(msg: &str, color: Color) -> String {
    if color_enabled() {
        msg.color(color).to_string()
    } else {
        msg.to_string()
    }
}

pub fn success(msg: &str) {
    println!("{}", paint(msg, Color::Green));
}

pub fn warning(msg: &str) {
    println!("{}", paint(msg, Color::Yellow));
}

pub fn info(msg: &str) {
    println!("{}", paint(msg, Color::Blue));
}

/// Printed to stderr
pub fn error(msg: &str) {
    eprintln!("{}", paint(msg, Color::Red));
}

pub fn plain(msg: &str) {
    println!("{msg}");
}
