use colored::Colorize;

use crate::config::{Config, Paths};
use crate::features::focus::{
    format_minutes, format_mmss, progress_color, render_progress_bar, Mode, ProgressBand,
};
use crate::features::history::{ProgressStatus, TotalStats};

const BAR_WIDTH: usize = 30;

/// Format today's progress as a coloured bar
pub fn format_status_pretty(status: &ProgressStatus) -> String {
    let ratio = status.percent / 100.0;
    let color = progress_color(ratio);
    let bar = render_progress_bar(ratio, BAR_WIDTH).truecolor(color.r, color.g, color.b);

    let headline = match status.band {
        ProgressBand::Low => "Getting started",
        ProgressBand::Mid => "Making progress",
        ProgressBand::High if status.minutes_completed >= status.goal_minutes => "Goal reached",
        ProgressBand::High => "Almost there",
    };

    let mut output = format!(
        "{} {}\n",
        "Today".bold(),
        status.date.format("%Y-%m-%d").to_string().dimmed()
    );
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("{bar} {:.0}%\n", status.percent));
    output.push_str(&format!(
        "  {}: {} of {}\n",
        "Worked".dimmed(),
        format_minutes(u64::from(status.minutes_completed)),
        format_minutes(u64::from(status.goal_minutes))
    ));
    output.push_str(&format!("  {headline}"));

    output
}

/// Format lifetime totals
pub fn format_stats_pretty(stats: &TotalStats) -> String {
    let mut output = "Lifetime totals\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {}\n",
        "Work ".dimmed(),
        format_minutes(stats.total_work_minutes).green()
    ));
    output.push_str(&format!(
        "  {}: {}",
        "Break".dimmed(),
        format_minutes(stats.total_break_minutes).cyan()
    ));

    output
}

/// Format the effective configuration and where it was read from
pub fn format_config_pretty(config: &Config, paths: &Paths) -> String {
    let mut output = "Configuration\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {} minutes\n",
        "Work duration ".dimmed(),
        config.timer.work_duration_minutes
    ));
    output.push_str(&format!(
        "  {}: {} minutes\n",
        "Break duration".dimmed(),
        config.timer.break_duration_minutes
    ));
    output.push_str(&format!(
        "  {}: {} hours\n",
        "Daily goal    ".dimmed(),
        config.goal.daily_goal_hours
    ));
    output.push_str(&format!(
        "  {}: {} days\n",
        "Retention     ".dimmed(),
        config.history.retention_days
    ));
    output.push('\n');
    output.push_str(&format!("  {}: {}\n", "Config ".dimmed(), paths.config_file.display()));
    output.push_str(&format!("  {}: {}", "History".dimmed(), paths.history_file.display()));

    output
}

/// One countdown line, redrawn in place while a session runs
pub fn format_countdown_pretty(mode: Mode, remaining_seconds: u32, total_seconds: u32) -> String {
    let label = match mode {
        Mode::Work => mode.label().red().bold(),
        Mode::Break => mode.label().green().bold(),
    };
    let done = if total_seconds == 0 {
        1.0
    } else {
        1.0 - f64::from(remaining_seconds) / f64::from(total_seconds)
    };

    format!(
        "\r{label} {} {}",
        format_mmss(remaining_seconds).bold(),
        render_progress_bar(done, BAR_WIDTH).dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn status(minutes: u32, goal: u32) -> ProgressStatus {
        let ratio = f64::from(minutes) / f64::from(goal);
        ProgressStatus {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            minutes_completed: minutes,
            goal_minutes: goal,
            percent: ratio.min(1.0) * 100.0,
            band: ProgressBand::of(ratio),
            color: progress_color(ratio.min(1.0)).hex(),
        }
    }

    #[test]
    fn test_format_status_pretty() {
        colored::control::set_override(false);

        let output = format_status_pretty(&status(60, 240));
        assert!(output.contains("2024-05-02"));
        assert!(output.contains("25%"));
        assert!(output.contains("1 hour of 4 hours"));
        assert!(output.contains("Getting started"));

        assert!(format_status_pretty(&status(240, 240)).contains("Goal reached"));
        assert!(format_status_pretty(&status(200, 240)).contains("Almost there"));
    }

    #[test]
    fn test_format_stats_pretty() {
        colored::control::set_override(false);

        let output = format_stats_pretty(&TotalStats {
            total_work_minutes: 150,
            total_break_minutes: 30,
        });
        assert!(output.contains("2 hours, 30 minutes"));
        assert!(output.contains("30 minutes"));
    }

    #[test]
    fn test_format_config_pretty() {
        colored::control::set_override(false);

        let paths = Paths::with_root(PathBuf::from("/tmp/pomo"));
        let output = format_config_pretty(&Config::default(), &paths);
        assert!(output.contains("25 minutes"));
        assert!(output.contains("4 hours"));
        assert!(output.contains("/tmp/pomo/config.yaml"));
    }

    #[test]
    fn test_format_countdown_pretty() {
        colored::control::set_override(false);

        let line = format_countdown_pretty(Mode::Work, 90, 1500);
        assert!(line.starts_with('\r'));
        assert!(line.contains("WORK"));
        assert!(line.contains("01:30"));
    }
}
