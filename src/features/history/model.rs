//! The persisted history document.
//!
//! Field names on disk follow the established file format (`work_time`,
//! `total_work_time`, ...); the Rust names spell out the unit.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One day's aggregated minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Work minutes logged that day.
    #[serde(rename = "work_time", default)]
    pub work_minutes: u32,
    /// Break minutes logged that day.
    #[serde(rename = "break_time", default)]
    pub break_minutes: u32,
}

impl DailyRecord {
    /// An empty record for `date`.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            work_minutes: 0,
            break_minutes: 0,
        }
    }
}

/// Progress toward today's goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentProgress {
    /// Day the minutes belong to.
    pub date: NaiveDate,
    /// Work minutes counted toward the goal.
    #[serde(default)]
    pub minutes_completed: u32,
    /// When the minutes were last changed.
    #[serde(with = "timestamp")]
    pub last_updated: NaiveDateTime,
}

impl CurrentProgress {
    /// Zero progress dated at `now`.
    #[must_use]
    pub fn fresh(now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            minutes_completed: 0,
            last_updated: now,
        }
    }
}

impl Default for CurrentProgress {
    /// Placeholder for documents without a progress entry; never "today".
    fn default() -> Self {
        Self::fresh(NaiveDateTime::MIN)
    }
}

/// Everything stored in `history.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryData {
    /// Per-day totals, oldest first, one per date.
    #[serde(default)]
    pub daily_records: Vec<DailyRecord>,
    /// Lifetime work minutes.
    #[serde(rename = "total_work_time", default)]
    pub total_work_minutes: u64,
    /// Lifetime break minutes.
    #[serde(rename = "total_break_time", default)]
    pub total_break_minutes: u64,
    /// Progress toward today's goal.
    #[serde(default)]
    pub current_progress: CurrentProgress,
}

impl HistoryData {
    /// Empty history with progress dated at `now`.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            daily_records: Vec::new(),
            total_work_minutes: 0,
            total_break_minutes: 0,
            current_progress: CurrentProgress::fresh(now),
        }
    }

    /// Repair a document read from disk.
    ///
    /// Sorts records by date and merges duplicate dates. A missing progress
    /// entry is replaced with zero progress dated at `now`.
    pub fn normalize(&mut self, now: NaiveDateTime) {
        if self.current_progress.date == NaiveDateTime::MIN.date() {
            self.current_progress = CurrentProgress::fresh(now);
        }

        self.daily_records.sort_by_key(|r| r.date);
        let mut merged: Vec<DailyRecord> = Vec::with_capacity(self.daily_records.len());
        for record in self.daily_records.drain(..) {
            match merged.last_mut() {
                Some(last) if last.date == record.date => {
                    last.work_minutes = last.work_minutes.saturating_add(record.work_minutes);
                    last.break_minutes = last.break_minutes.saturating_add(record.break_minutes);
                }
                _ => merged.push(record),
            }
        }
        self.daily_records = merged;
    }

    /// Record for `date`, if any.
    #[must_use]
    pub fn record_for(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.daily_records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.daily_records[i])
    }

    /// Record for `date`, inserted in date order if missing.
    pub fn record_for_mut(&mut self, date: NaiveDate) -> &mut DailyRecord {
        let index = match self.daily_records.binary_search_by_key(&date, |r| r.date) {
            Ok(i) => i,
            Err(i) => {
                self.daily_records.insert(i, DailyRecord::empty(date));
                i
            }
        };
        &mut self.daily_records[index]
    }
}

/// `YYYY-MM-DD HH:MM:SS` timestamps.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&text, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f"))
            .map_err(serde::de::Error::custom)
    }
}
