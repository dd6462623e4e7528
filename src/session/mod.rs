//! Typed session-state container.
//!
//! Replaces the page-global mutable variables of a classic web panel
//! (`selectedChatId`, the translation table, the loaded flags) with one
//! explicit struct handed into component handlers. All mutation happens on
//! the single event-driven thread.

use std::collections::HashMap;

use crate::i18n::Translations;
use crate::identity::Identity;
use crate::models::{ChatScope, SettingKey};

/// Day-count choices for the statistics period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    #[default]
    Week,
    Month,
    Quarter,
}

impl StatsPeriod {
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }
}

/// A mutable field guarded against stale write responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteField {
    Setting(SettingKey),
    Punishment(u8),
}

/// Generation counters per mutable field.
///
/// Save requests are never cancelled, so responses can arrive out of order.
/// Each write takes a fresh generation at send time; a response whose
/// generation is no longer current must be discarded instead of overwriting
/// newer state.
#[derive(Debug, Default)]
pub struct FieldGenerations {
    counters: HashMap<WriteField, u64>,
}

impl FieldGenerations {
    /// Start a write; returns the generation the response must still match.
    pub fn begin(&mut self, field: WriteField) -> u64 {
        let counter = self.counters.entry(field).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Whether a response with `generation` is still the latest write.
    pub fn is_current(&self, field: WriteField, generation: u64) -> bool {
        self.counters.get(&field).copied() == Some(generation)
    }
}

/// Everything the panel shares across components for one session.
pub struct Session {
    /// Immutable host identity the session runs as
    pub identity: Identity,

    pub translations: Translations,

    /// Chat scope the settings page currently targets
    pub selected_chat: Option<ChatScope>,

    /// Chat the statistics page currently targets
    pub stats_chat: Option<i64>,

    pub period: StatsPeriod,

    /// Once-only guards for the two independent chat-list fetches
    pub settings_chats_loaded: bool,
    pub stats_chats_loaded: bool,

    pub generations: FieldGenerations,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            translations: Translations::default(),
            selected_chat: None,
            stats_chat: None,
            period: StatsPeriod::default(),
            settings_chats_loaded: false,
            stats_chats_loaded: false,
            generations: FieldGenerations::default(),
        }
    }

    /// Translation lookup shorthand for handlers.
    pub fn t(&self, key: &str) -> String {
        self.translations.t(key)
    }
}
