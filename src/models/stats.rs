//! Statistics snapshot returned by the backend.
//!
//! Read-only; fetched per (chat, period) pair and never persisted
//! client-side beyond the current view.

use serde::{Deserialize, Serialize};

use super::ChatSettings;

/// Full statistics payload for one chat and period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub historical: Historical,

    #[serde(default)]
    pub current: CurrentStatus,
}

/// Aggregates over the requested period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Historical {
    #[serde(default)]
    pub totals: Totals,

    #[serde(default)]
    pub daily: Vec<DailyActivity>,

    #[serde(default)]
    pub hourly_activity: Vec<HourlyActivity>,

    #[serde(default)]
    pub top_violators: Vec<Violator>,
}

/// Period totals used for the summary cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub total_messages: u64,

    #[serde(default)]
    pub total_deleted: u64,

    #[serde(default)]
    pub total_joined: i64,

    #[serde(default)]
    pub total_left: i64,

    #[serde(default)]
    pub total_captcha_passed: u64,

    #[serde(default)]
    pub total_captcha_failed: u64,
}

/// One day of activity for the line chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyActivity {
    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub messages_total: u64,

    #[serde(default)]
    pub messages_deleted: u64,
}

/// Message count for one hour-of-day bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlyActivity {
    /// Hour of day, 0..=23
    #[serde(default)]
    pub hour: u8,

    #[serde(default)]
    pub count: u64,
}

/// Leaderboard entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Violator {
    #[serde(default)]
    pub user_id: i64,

    #[serde(default)]
    pub violation_count: u64,
}

/// Live state of the chat at fetch time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentStatus {
    #[serde(default)]
    pub settings: ChatSettings,

    #[serde(default)]
    pub warnings: WarningSummary,

    #[serde(default)]
    pub blocklist_count: u64,

    #[serde(default)]
    pub whitelist_count: u64,
}

/// Warning counters for the status panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarningSummary {
    #[serde(default)]
    pub users_with_warnings: u64,

    #[serde(default)]
    pub total_warnings: u64,
}
