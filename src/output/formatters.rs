//! Reusable formatting utilities for CLI output
//!
//! Shared by the pretty and table renderings of events, chores and weather.

use chrono::{DateTime, Local, Utc};
use colored::{Color, ColoredString, Colorize};

/// Local start time, e.g. `09:30`. All-day events (local midnight to
/// midnight) read as `All day`.
pub fn format_event_time(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let start = start.with_timezone(&Local);
    let end = end.with_timezone(&Local);

    let midnight = chrono::NaiveTime::MIN;
    let spans_days = (end - start).num_hours() >= 24;
    if start.time() == midnight && end.time() == midnight && spans_days {
        return "All day".to_string();
    }

    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

/// Day heading for agenda output, e.g. `Mon Feb 09`
pub fn format_day(start: DateTime<Utc>) -> String {
    start.with_timezone(&Local).format("%a %b %d").to_string()
}

/// Temperature with unit, e.g. `72°F`
pub fn format_temperature(value: i32, unit: &str) -> String {
    format!("{}°{}", value, unit)
}

/// Optional temperature, `--` when absent
pub fn format_bound(value: Option<i32>, unit: &str) -> String {
    value
        .map(|v| format_temperature(v, unit))
        .unwrap_or_else(|| "--".to_string())
}

/// Map a palette name from the config to a terminal color
pub fn palette_color(name: &str) -> Color {
    match name {
        "rose" | "red" => Color::Red,
        "pink" | "purple" => Color::Magenta,
        "emerald" | "green" => Color::Green,
        "yellow" | "orange" => Color::Yellow,
        "blue" | "indigo" => Color::Blue,
        "cyan" => Color::Cyan,
        "gray" => Color::BrightBlack,
        "rainbow" => Color::BrightMagenta,
        _ => Color::White,
    }
}

/// Paint `text` in the named palette color
pub fn paint(text: &str, palette: &str) -> ColoredString {
    text.color(palette_color(palette))
}
