//! Durable history of daily work and break minutes.
//!
//! The store is loaded once, mutated in memory and written through to its
//! [`HistoryStorage`] after every change. Storage problems never escape: an
//! unreadable document becomes a fresh history and a failed write is logged.

use chrono::{Days, NaiveDate};

use super::model::{CurrentProgress, HistoryData};
use super::report::{DaySummary, TotalStats};
use crate::config::Config;
use crate::core::Clock;
use crate::error::PomoError;
use crate::features::focus::{Mode, GOAL_HOURS};
use crate::storage::HistoryStorage;

/// Default number of days a daily record is kept.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Default daily goal (4 hours).
pub const DEFAULT_GOAL_MINUTES: u32 = 4 * 60;

/// Default length of [`HistoryStore::get_daily_summary`].
pub const DEFAULT_SUMMARY_DAYS: u32 = 7;

/// Persisted history plus the daily goal it is measured against.
pub struct HistoryStore {
    data: HistoryData,
    storage: Box<dyn HistoryStorage>,
    clock: Box<dyn Clock>,
    daily_goal_minutes: u32,
    retention_days: u32,
}

impl HistoryStore {
    /// Load history from `storage`.
    ///
    /// A missing or unreadable document yields an empty history with
    /// progress dated today. This never fails.
    pub fn load(storage: impl HistoryStorage + 'static, clock: impl Clock + 'static) -> Self {
        let now = clock.now();

        let data = match storage.load() {
            Ok(Some(bytes)) => match serde_json::from_slice::<HistoryData>(&bytes) {
                Ok(mut data) => {
                    data.normalize(now);
                    log::debug!("loaded {} daily records", data.daily_records.len());
                    data
                }
                Err(e) => {
                    log::warn!("history is corrupt, starting fresh: {e}");
                    HistoryData::new(now)
                }
            },
            Ok(None) => {
                log::debug!("no history yet, starting fresh");
                HistoryData::new(now)
            }
            Err(e) => {
                log::warn!("history could not be read, starting fresh: {e}");
                HistoryData::new(now)
            }
        };

        Self {
            data,
            storage: Box::new(storage),
            clock: Box::new(clock),
            daily_goal_minutes: DEFAULT_GOAL_MINUTES,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    /// Load history and apply goal and retention settings from `config`.
    pub fn from_config(
        config: &Config,
        storage: impl HistoryStorage + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let mut store = Self::load(storage, clock).with_retention_days(config.history.retention_days);
        store.set_daily_goal_hours(config.goal.daily_goal_hours);
        store
    }

    /// Keep daily records for `days` days (at least one).
    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days.max(1);
        self
    }

    /// The in-memory document.
    #[must_use]
    pub const fn data(&self) -> &HistoryData {
        &self.data
    }

    /// Today according to the injected clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Minutes completed toward today's goal.
    ///
    /// Progress stored under another date counts as zero.
    #[must_use]
    pub fn get_current_progress(&self) -> u32 {
        let progress = &self.data.current_progress;
        if progress.date == self.today() {
            progress.minutes_completed
        } else {
            0
        }
    }

    /// Set today's progress to `minutes` and persist.
    pub fn update_current_progress(&mut self, minutes: u32) {
        let now = self.clock.now();
        if self.data.current_progress.date != now.date() {
            log::info!(
                "progress rolled over from {} to {}",
                self.data.current_progress.date,
                now.date()
            );
            self.data.current_progress = CurrentProgress::fresh(now);
        }

        self.data.current_progress.minutes_completed = minutes;
        self.data.current_progress.last_updated = now;
        self.persist();
    }

    /// Zero today's progress.
    pub fn reset_progress(&mut self) {
        self.update_current_progress(0);
    }

    /// Credit work minutes to today's progress, capped at the goal.
    ///
    /// Progress never decreases. Returns the previous and updated minutes.
    pub fn add_progress(&mut self, minutes: u32) -> (u32, u32) {
        let previous = self.get_current_progress();
        let updated = previous
            .saturating_add(minutes)
            .min(self.daily_goal_minutes)
            .max(previous);

        self.update_current_progress(updated);
        (previous, updated)
    }

    /// Add `minutes` of `mode` time to today's record and the lifetime totals.
    ///
    /// Prunes records that fell out of the retention window, then persists.
    pub fn record_session(&mut self, mode: Mode, minutes: u32) {
        let today = self.today();
        let record = self.data.record_for_mut(today);

        match mode {
            Mode::Work => {
                record.work_minutes = record.work_minutes.saturating_add(minutes);
                self.data.total_work_minutes =
                    self.data.total_work_minutes.saturating_add(u64::from(minutes));
            }
            Mode::Break => {
                record.break_minutes = record.break_minutes.saturating_add(minutes);
                self.data.total_break_minutes =
                    self.data.total_break_minutes.saturating_add(u64::from(minutes));
            }
        }

        log::info!("recorded {minutes} {mode} minutes for {today}");
        self.prune();
        self.persist();
    }

    /// Per-day minutes for the last `days` days, today first.
    ///
    /// Always returns exactly `days` entries; days without a record are zero.
    #[must_use]
    pub fn get_daily_summary(&self, days: u32) -> Vec<DaySummary> {
        let today = self.today();

        (0..days)
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .map(|date| {
                self.data.record_for(date).map_or_else(
                    || DaySummary::empty(date),
                    |r| DaySummary {
                        date,
                        work_minutes: r.work_minutes,
                        break_minutes: r.break_minutes,
                    },
                )
            })
            .collect()
    }

    /// Lifetime work and break totals.
    #[must_use]
    pub const fn get_total_time_stats(&self) -> TotalStats {
        TotalStats {
            total_work_minutes: self.data.total_work_minutes,
            total_break_minutes: self.data.total_break_minutes,
        }
    }

    /// The daily goal in minutes.
    #[must_use]
    pub const fn daily_goal_minutes(&self) -> u32 {
        self.daily_goal_minutes
    }

    /// Set the daily goal from hours.
    ///
    /// Values outside 1-24 are ignored. Returns whether the goal changed.
    pub fn set_daily_goal_hours(&mut self, hours: u32) -> bool {
        if !GOAL_HOURS.contains(&hours) {
            return false;
        }
        let minutes = hours * 60;
        let changed = minutes != self.daily_goal_minutes;
        self.daily_goal_minutes = minutes;
        changed
    }

    /// Write the whole document to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self) -> Result<(), PomoError> {
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        self.storage.save(&bytes)
    }

    /// Save, logging instead of failing.
    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("failed to save history: {e}");
        }
    }

    /// Drop records older than the retention window.
    fn prune(&mut self) {
        let Some(cutoff) = self
            .today()
            .checked_sub_days(Days::new(u64::from(self.retention_days)))
        else {
            return;
        };

        let before = self.data.daily_records.len();
        self.data.daily_records.retain(|r| r.date >= cutoff);
        let removed = before - self.data.daily_records.len();
        if removed > 0 {
            log::debug!("pruned {removed} records older than {cutoff}");
        }
    }
}
