use chrono::{DateTime, Utc};
use colored::Colorize;
use extractpics::api::{CmdMessage, MessageLevel, StatsSummary};
use extractpics::model::{ExtractMode, HistoryEntry, Preferences, RetentionState, ScanMode};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 12;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No extractions yet.");
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let mode = match entry.scan_mode {
            ScanMode::Quick => "quick",
            ScanMode::Deep => "deep ",
        };
        let count = format!(
            "{:>width$}",
            format!("{} img", entry.image_count),
            width = COUNT_WIDTH
        );
        let time_ago = format_time_ago(entry.timestamp);

        let fixed_width = idx_str.width() + mode.width() + 1 + COUNT_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let url_display = truncate_to_width(&entry.url, available);
        let padding = available.saturating_sub(url_display.width());

        println!(
            "{}{} {}{}{}{}",
            idx_str.yellow(),
            mode.cyan(),
            url_display,
            " ".repeat(padding),
            count,
            time_ago.dimmed()
        );
        println!("     {}", entry.id.dimmed());
    }
}

pub(super) fn print_preferences(prefs: &Preferences) {
    let scan_mode = match prefs.default_scan_mode {
        ScanMode::Quick => "quick",
        ScanMode::Deep => "deep",
    };
    let mode = match prefs.default_mode {
        ExtractMode::Single => "single",
        ExtractMode::Batch => "batch",
    };
    println!("{:<18}{}", "scan mode".bold(), scan_mode);
    println!("{:<18}{}", "mode".bold(), mode);
    println!("{:<18}{}", "sound".bold(), if prefs.sound_enabled { "on" } else { "off" });
    println!("{:<18}{}", "min width".bold(), prefs.last_min_width);
}

pub(super) fn print_summary(summary: &StatsSummary) {
    let stats = &summary.stats;
    println!("{:<24}{}", "extractions".bold(), stats.total_extractions);
    println!("{:<24}{}", "images extracted".bold(), stats.total_images_extracted);
    println!(
        "{:<24}{:.1}",
        "images / extraction".bold(),
        summary.average_images_per_extraction
    );
    println!("{:<24}{}", "batch extractions".bold(), stats.batch_extractions);
    println!("{:<24}{}", "deep scans".bold(), stats.deep_scans);
    println!("{:<24}{}", "visits".bold(), stats.visit_count);
    println!(
        "{:<24}{} (longest {})",
        "streak".bold(),
        stats.current_streak,
        stats.longest_streak
    );
    println!(
        "{:<24}{} ({})",
        "first visit".bold(),
        format_time_ago(stats.first_visit).trim(),
        format!("{} day(s)", summary.days_since_first_visit).dimmed()
    );
    println!(
        "{:<24}{}",
        "last visit".bold(),
        format_time_ago(stats.last_visit).trim()
    );
}

pub(super) fn print_email_status(state: &RetentionState, due: bool) {
    println!(
        "{:<18}{}",
        "prompt shown".bold(),
        if state.email_capture_shown { "yes" } else { "no" }
    );
    match state.email_captured_at.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(at) => println!("{:<18}{}", "captured".bold(), at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("{:<18}{}", "captured".bold(), "no"),
    }
    if due {
        println!("{}", "The email prompt is due.".green());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp_ms: i64) -> String {
    let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return format!("{:>width$}", "?", width = TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
