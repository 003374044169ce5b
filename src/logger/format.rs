//! Line layout for console and file output
//!
//! Console lines are coloured and go to stderr so command output on stdout
//! stays pipeable. Long messages wrap at word boundaries with continuation
//! lines indented under the message column. File lines carry no colour.

use super::config::get_logger_config;
use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;
/// Brackets and separating spaces around tag and level: "[..] [..] "
const DECORATION_WIDTH: usize = 6;
const MAX_LINE_LENGTH: usize = 140;
const MIN_MESSAGE_WIDTH: usize = 40;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let clock = if get_logger_config().show_date {
        now.format("%Y-%m-%d %H:%M:%S ").to_string()
    } else {
        now.format("%H:%M:%S ").to_string()
    };

    let indent = clock.len() + TAG_WIDTH + LEVEL_WIDTH + DECORATION_WIDTH;
    let width = MAX_LINE_LENGTH.saturating_sub(indent).max(MIN_MESSAGE_WIDTH);
    let lines = wrap_text(message, width);

    let head = format!(
        "{}[{}] [{}] ",
        clock.dimmed(),
        tag_label(&tag),
        level_label(level)
    );
    let file_head = format!(
        "{} [{}] [{}]",
        now.format("%Y-%m-%d %H:%M:%S"),
        tag.to_plain_string(),
        level.as_str()
    );

    for (index, line) in lines.iter().enumerate() {
        if index == 0 {
            print_stderr(&format!("{}{}", head, line));
        } else {
            print_stderr(&format!("{}{}", " ".repeat(indent), line));
        }
        write_to_file(&format!("{} {}", file_head, line));
    }
}

fn tag_label(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Api => label.bright_purple().bold(),
        LogTag::Cache => label.bright_cyan().bold(),
        LogTag::RateLimit => label.bright_blue().bold(),
        LogTag::Portfolio => label.bright_green().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::External => label.white().dimmed(),
    }
}

fn level_label(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug => label.bright_blue(),
        LogLevel::Verbose => label.dimmed(),
    }
}

/// A closed pipe ends the process quietly
fn print_stderr(line: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}

/// Split on newlines, then greedily fill lines of at most `width` chars
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.chars().count() <= width {
            lines.push(paragraph.to_string());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let used = current.chars().count();
            if used > 0 && used + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_pass_through() {
        assert_eq!(wrap_text("cache hit", 40), vec!["cache hit".to_string()]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("fetching market list page one", 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), "fetching market list page one");
    }

    #[test]
    fn long_words_are_chunked() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn embedded_newlines_are_kept() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
    }
}
