//! Punishment-escalation rules.

use serde::{Deserialize, Serialize};

/// Action applied when a user reaches a violation level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PunishmentAction {
    /// Warn the user (no restriction)
    Warn,
    /// Mute the user for a duration
    Mute,
    /// Kick the user (can rejoin)
    Kick,
    /// Ban permanently
    Ban,
}

impl Default for PunishmentAction {
    fn default() -> Self {
        Self::Mute
    }
}

impl PunishmentAction {
    /// Bans are permanent; a duration is meaningless for them.
    pub fn takes_duration(&self) -> bool {
        !matches!(self, Self::Ban)
    }
}

/// Escalation rule for one violation level of a chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PunishmentRule {
    /// Violation-count threshold this rule fires at
    pub level: u8,

    #[serde(default)]
    pub action: PunishmentAction,

    /// Restriction duration in seconds (0 = permanent)
    #[serde(default)]
    pub duration_secs: u64,
}

impl PunishmentRule {
    /// Build a rule, forcing the duration to 0 for permanent actions.
    pub fn new(level: u8, action: PunishmentAction, duration_secs: u64) -> Self {
        let duration_secs = if action.takes_duration() {
            duration_secs
        } else {
            0
        };
        Self {
            level,
            action,
            duration_secs,
        }
    }
}
