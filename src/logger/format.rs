//! Log formatting and output with ANSI colors and text wrapping
//!
//! Handles colorized console output, wrapping at word boundaries,
//! mirroring into the log file, and broken pipes.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 7;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let base_line = format!(
        "{} [{}] [{}] ",
        time.dimmed(),
        format_tag(&tag),
        format_level(level)
    );
    // time + space + "[tag] " + "[level] "
    let prefix_width = time.len() + 1 + TAG_WIDTH + 3 + LEVEL_WIDTH + 3;
    let available_space = MAX_LINE_LENGTH.saturating_sub(prefix_width).max(50);

    let chunks = wrap_text(message, available_space);
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    for (index, chunk) in chunks.iter().enumerate() {
        if index == 0 {
            print_stderr_safe(&format!("{}{}", base_line, chunk));
        } else {
            print_stderr_safe(&format!("{}{}", " ".repeat(prefix_width), chunk));
        }
        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            tag.to_plain_string(),
            level.as_str(),
            chunk
        ));
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Api => label.bright_purple().bold(),
        LogTag::Trader => label.bright_green().bold(),
        LogTag::Telegram => label.bright_cyan().bold(),
        LogTag::Database => label.bright_blue().bold(),
        LogTag::Blacklist => label.bright_red().bold(),
        LogTag::Dashboard => label.bright_magenta().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

/// Print to stderr, exiting quietly on a broken pipe
fn print_stderr_safe(message: &str) {
    let mut handle = stderr();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Words longer than `max_width` are split on character boundaries.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();

            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_width) {
                    result.push(chunk.iter().collect());
                }
            } else if current.is_empty() {
                current = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}
