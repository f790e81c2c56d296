//! Persisted work/break history and daily-goal progress.
//!
//! - `model` is the on-disk document
//! - `store` loads, mutates and writes it through
//! - `report` summarises it for display

pub mod model;
pub mod report;
pub mod store;

pub use model::{CurrentProgress, DailyRecord, HistoryData};
pub use report::{DaySummary, HistoryReport, ProgressStatus, TotalStats};
pub use store::{
    HistoryStore, DEFAULT_GOAL_MINUTES, DEFAULT_RETENTION_DAYS, DEFAULT_SUMMARY_DAYS,
};
