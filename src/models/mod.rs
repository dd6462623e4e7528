//! Data models exchanged with the backend REST API.
//!
//! All records here are backend-owned; the client keeps only transient,
//! view-scoped copies.

mod chat;
mod punishment;
mod settings;
mod stats;

pub use chat::{Chat, ChatScope};
pub use punishment::{PunishmentAction, PunishmentRule};
pub use settings::{ChatSettings, SettingKey, SettingValue};
pub use stats::{
    CurrentStatus, DailyActivity, Historical, HourlyActivity, StatsSnapshot, Totals, Violator,
    WarningSummary,
};
