//! Summaries built from the stored history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::store::HistoryStore;
use crate::features::focus::{format_minutes, progress_color, progress_ratio, ProgressBand};

/// One day's minutes in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl DaySummary {
    /// A day with nothing logged.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            work_minutes: 0,
            break_minutes: 0,
        }
    }
}

/// Lifetime totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStats {
    pub total_work_minutes: u64,
    pub total_break_minutes: u64,
}

/// Today's standing against the daily goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStatus {
    pub date: NaiveDate,
    pub minutes_completed: u32,
    pub goal_minutes: u32,
    pub percent: f64,
    pub band: ProgressBand,
    /// Progress bar colour, `#rrggbb`.
    pub color: String,
}

impl ProgressStatus {
    /// Read today's progress from `store`.
    #[must_use]
    pub fn of(store: &HistoryStore) -> Self {
        let minutes_completed = store.get_current_progress();
        let goal_minutes = store.daily_goal_minutes();
        let ratio = progress_ratio(minutes_completed, goal_minutes);

        Self {
            date: store.today(),
            minutes_completed,
            goal_minutes,
            percent: ratio * 100.0,
            band: ProgressBand::of(ratio),
            color: progress_color(ratio).hex(),
        }
    }
}

/// Report over the last few days.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    /// Days covered, today first.
    pub days: Vec<DaySummary>,
    /// Work minutes in the window.
    pub work_minutes: u64,
    /// Break minutes in the window.
    pub break_minutes: u64,
    /// Days in the window with any work logged.
    pub active_days: u32,
    /// Average work minutes per active day.
    pub average_work_minutes: f64,
    /// Day with the most work.
    pub best_day: Option<DaySummary>,
    /// Consecutive days with work, counting back from today (or yesterday).
    pub streak_days: u32,
    /// Lifetime totals.
    pub totals: TotalStats,
}

impl HistoryReport {
    /// Build a report for the last `days` days.
    #[must_use]
    pub fn generate(store: &HistoryStore, days: u32) -> Self {
        let summary = store.get_daily_summary(days);

        let work_minutes: u64 = summary.iter().map(|d| u64::from(d.work_minutes)).sum();
        let break_minutes: u64 = summary.iter().map(|d| u64::from(d.break_minutes)).sum();
        let active_days = u32::try_from(summary.iter().filter(|d| d.work_minutes > 0).count())
            .unwrap_or(u32::MAX);

        #[allow(clippy::cast_precision_loss)]
        let average_work_minutes = if active_days > 0 {
            work_minutes as f64 / f64::from(active_days)
        } else {
            0.0
        };

        let best_day = summary
            .iter()
            .filter(|d| d.work_minutes > 0)
            .max_by_key(|d| (d.work_minutes, std::cmp::Reverse(d.date)))
            .copied();

        Self {
            streak_days: calculate_streak(&summary),
            days: summary,
            work_minutes,
            break_minutes,
            active_days,
            average_work_minutes,
            best_day,
            totals: store.get_total_time_stats(),
        }
    }

    /// Format the report for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("📊 History: last {} days", self.days.len()));
        lines.push("═".repeat(44));
        lines.push(String::new());

        lines.push(format!("{:<12} {:>8} {:>8}", "Date", "Work", "Break"));
        lines.push("─".repeat(44));

        let max_work = self
            .days
            .iter()
            .map(|d| d.work_minutes)
            .max()
            .unwrap_or(0)
            .max(1);

        for day in &self.days {
            let bar_len = (day.work_minutes * 16 / max_work) as usize;
            lines.push(format!(
                "{:<12} {:>7}m {:>7}m  {}",
                day.date.format("%Y-%m-%d"),
                day.work_minutes,
                day.break_minutes,
                "█".repeat(bar_len)
            ));
        }

        lines.push(String::new());
        lines.push("Summary".to_string());
        lines.push("─".repeat(44));
        lines.push(format!("  Work time:      {}", format_minutes(self.work_minutes)));
        lines.push(format!("  Break time:     {}", format_minutes(self.break_minutes)));
        lines.push(format!("  Active days:    {}", self.active_days));
        lines.push(format!(
            "  Average/day:    {:.0} minutes",
            self.average_work_minutes
        ));
        if let Some(best) = self.best_day {
            lines.push(format!(
                "  Best day:       {} ({} minutes)",
                best.date.format("%Y-%m-%d"),
                best.work_minutes
            ));
        }
        lines.push(format!("  Current streak: {} days", self.streak_days));

        lines.join("\n")
    }
}

/// Count consecutive days with work, today first.
///
/// A day without work today does not break a streak that ran through
/// yesterday.
fn calculate_streak(days: &[DaySummary]) -> u32 {
    let mut iter = days.iter().peekable();

    if iter.peek().is_some_and(|today| today.work_minutes == 0) {
        iter.next();
    }

    let count = iter.take_while(|d| d.work_minutes > 0).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::focus::Mode;
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn day(d: u32, work: u32) -> DaySummary {
        DaySummary {
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            work_minutes: work,
            break_minutes: 0,
        }
    }

    #[test]
    fn test_streak_counts_from_today() {
        assert_eq!(calculate_streak(&[day(10, 25), day(9, 50), day(8, 0)]), 2);
    }

    #[test]
    fn test_streak_skips_empty_today() {
        assert_eq!(calculate_streak(&[day(10, 0), day(9, 50), day(8, 25)]), 2);
        assert_eq!(calculate_streak(&[day(10, 0), day(9, 0), day(8, 25)]), 0);
        assert_eq!(calculate_streak(&[]), 0);
    }

    #[test]
    fn test_generate_report() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 8)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let clock = FixedClock::new(start);
        let mut store = HistoryStore::load(MemoryStorage::new(), clock.clone());

        store.record_session(Mode::Work, 50);
        clock.advance(Duration::days(1));
        store.record_session(Mode::Work, 25);
        store.record_session(Mode::Break, 5);
        clock.advance(Duration::days(1));

        let report = HistoryReport::generate(&store, 7);

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.work_minutes, 75);
        assert_eq!(report.break_minutes, 5);
        assert_eq!(report.active_days, 2);
        assert!((report.average_work_minutes - 37.5).abs() < f64::EPSILON);
        assert_eq!(report.best_day.unwrap().work_minutes, 50);
        assert_eq!(report.streak_days, 2);
        assert_eq!(report.totals.total_work_minutes, 75);

        let text = report.format();
        assert!(text.contains("last 7 days"));
        assert!(text.contains("2024-05-08"));
    }

    #[test]
    fn test_progress_status() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 8)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let mut store = HistoryStore::load(MemoryStorage::new(), FixedClock::new(now));
        store.update_current_progress(120);

        let status = ProgressStatus::of(&store);

        assert_eq!(status.minutes_completed, 120);
        assert_eq!(status.goal_minutes, 240);
        assert!((status.percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(status.band, ProgressBand::Mid);
        assert_eq!(status.color, progress_color(0.5).hex());
    }
}
