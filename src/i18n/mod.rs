//! Internationalization (i18n) module.
//!
//! Loads a language pack plus the English fallback from the backend, merges
//! them, and applies the result to labeled text bindings. A failed fetch
//! degrades that pack to empty; a key missing from both packs renders as
//! `[key]` so the gap is visible instead of crashing.

use std::collections::HashMap;

use tracing::warn;

use crate::api::ApiClient;

/// Merged translation table for the session.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    table: HashMap<String, String>,
}

impl Translations {
    /// Merge two packs: `base` (English) overridden by `overlay` (user lang).
    pub fn merged(base: HashMap<String, String>, overlay: HashMap<String, String>) -> Self {
        let mut table = base;
        table.extend(overlay);
        Self { table }
    }

    /// Look up a key, falling back to the visible `[key]` marker.
    pub fn t(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("[{key}]"))
    }

    /// Fill every labeled binding from the table.
    pub fn apply(&self, bindings: &mut [TextBinding]) {
        for binding in bindings {
            binding.text = self.t(&binding.key);
        }
    }
}

/// Which slot of a widget the translated text lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Content,
    Placeholder,
}

/// A widget label bound to a translation key.
#[derive(Debug, Clone)]
pub struct TextBinding {
    pub key: String,
    pub slot: TextSlot,
    pub text: String,
}

impl TextBinding {
    pub fn new(key: impl Into<String>, slot: TextSlot) -> Self {
        Self {
            key: key.into(),
            slot,
            text: String::new(),
        }
    }
}

/// Fetch and merge the `lang` pack with the English fallback.
///
/// Both fetches run concurrently; either failure degrades that pack to empty,
/// never blocking rendering.
pub async fn load(api: &ApiClient, lang: &str) -> Translations {
    let (primary, fallback) =
        futures::future::join(api.translations(lang), api.translations("en")).await;

    let overlay = primary.unwrap_or_else(|err| {
        warn!(lang, %err, "failed to load primary translations");
        HashMap::new()
    });
    let base = fallback.unwrap_or_else(|err| {
        warn!(%err, "failed to load fallback translations");
        HashMap::new()
    });

    Translations::merged(base, overlay)
}
