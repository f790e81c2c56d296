//! Duration limits, input parsing and countdown formatting.

use std::ops::RangeInclusive;

/// Valid work session lengths, in minutes.
pub const WORK_MINUTES: RangeInclusive<u32> = 1..=120;

/// Valid break lengths, in minutes.
pub const BREAK_MINUTES: RangeInclusive<u32> = 1..=30;

/// Valid daily goals, in hours.
pub const GOAL_HOURS: RangeInclusive<u32> = 1..=24;

/// Parse user text as an integer inside `range`.
///
/// Returns `None` for anything that is not a plain integer in range. Callers
/// treat `None` as "leave state unchanged".
#[must_use]
pub fn parse_in_range(text: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    let value: i64 = text.trim().parse().ok()?;
    u32::try_from(value).ok().filter(|v| range.contains(v))
}

/// Format a number of seconds as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let plural = |n: u64| if n == 1 { "" } else { "s" };

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{hours} hour{}, {minutes} minute{}",
                plural(hours),
                plural(minutes)
            )
        } else {
            format!("{hours} hour{}", plural(hours))
        }
    } else {
        format!("{minutes} minute{}", plural(minutes))
    }
}

/// Render a progress bar for a ratio in `0.0..=1.0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
