//! Word list management page.
//!
//! Drives the two moderation lists of a chat: the score-weighted blocklist
//! and the plain whitelist. The page only opens for a concrete chat; the
//! global scope has no per-chat lists.

use tracing::warn;

use crate::api::ApiClient;
use crate::models::ChatScope;
use crate::session::Session;
use crate::ui::{HostHandle, LoadState, ToastLevel};

/// Which list the page is currently managing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Blocklist,
    Whitelist,
}

impl ListKind {
    fn title_key(&self) -> &'static str {
        match self {
            Self::Blocklist => "blocklist_title",
            Self::Whitelist => "whitelist_title",
        }
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    /// Spam score; present for blocklist entries only
    pub score: Option<u32>,
}

/// View state of the word list page.
#[derive(Debug, Clone, Default)]
pub struct WordListView {
    pub visible: bool,
    pub title: String,
    pub entries: Vec<WordEntry>,
    pub state: LoadState,
}

/// Trim and lowercase user input; `None` when nothing is left.
///
/// The backend keys entries by this normalized form.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() { None } else { Some(word) }
}

/// Word list page component.
pub struct WordListManager {
    api: ApiClient,
    host: HostHandle,
    kind: Option<ListKind>,
    pub view: WordListView,
}

impl WordListManager {
    pub fn new(api: ApiClient, host: HostHandle) -> Self {
        Self {
            api,
            host,
            kind: None,
            view: WordListView::default(),
        }
    }

    fn selected_chat(session: &Session) -> Option<i64> {
        match session.selected_chat {
            Some(ChatScope::Chat(id)) => Some(id),
            _ => None,
        }
    }

    /// Open the page for one list; requires a concrete selected chat.
    pub async fn show(&mut self, session: &mut Session, kind: ListKind) {
        let Some(chat_id) = Self::selected_chat(session) else {
            self.host
                .toast(&session.t("select_chat_first"), ToastLevel::Error);
            return;
        };

        self.kind = Some(kind);
        self.view.visible = true;
        self.view.title = session.t(kind.title_key());
        self.host.set_back_button(true);
        self.load_list(chat_id, kind).await;
    }

    /// Return to the settings page.
    pub fn hide(&mut self) {
        self.view.visible = false;
        self.host.set_back_button(false);
    }

    /// Re-derive the translated title after a language change.
    pub fn refresh_translations(&mut self, session: &Session) {
        if let Some(kind) = self.kind {
            self.view.title = session.t(kind.title_key());
        }
    }

    async fn load_list(&mut self, chat_id: i64, kind: ListKind) {
        self.view.entries.clear();
        self.view.state = LoadState::Loading;

        let result = match kind {
            ListKind::Blocklist => self.api.spam_words(chat_id).await.map(|map| {
                map.into_iter()
                    .map(|(word, score)| WordEntry {
                        word,
                        score: Some(score),
                    })
                    .collect::<Vec<_>>()
            }),
            ListKind::Whitelist => self.api.whitelist(chat_id).await.map(|words| {
                words
                    .into_iter()
                    .map(|word| WordEntry { word, score: None })
                    .collect()
            }),
        };

        match result {
            Ok(entries) => {
                self.view.entries = entries;
                self.view.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(%err, chat_id, ?kind, "failed to load word list");
                self.view.state = LoadState::Error(err.to_string());
            }
        }
    }

    /// Normalize and submit a new entry; appends it on success.
    ///
    /// Empty input after normalization is rejected locally without a request.
    /// `score` only applies to the blocklist.
    pub async fn add_word(&mut self, session: &mut Session, raw: &str, score: u32) {
        let (Some(kind), Some(chat_id)) = (self.kind, Self::selected_chat(session)) else {
            return;
        };
        let Some(word) = normalize_word(raw) else {
            return;
        };

        let result = match kind {
            ListKind::Blocklist => self.api.add_spam_word(chat_id, &word, score).await,
            ListKind::Whitelist => self.api.add_whitelist_word(chat_id, &word).await,
        };

        match result {
            Ok(()) => {
                self.view.entries.push(WordEntry {
                    word,
                    score: (kind == ListKind::Blocklist).then_some(score),
                });
                self.host
                    .toast(&session.t("changes_saved"), ToastLevel::Info);
            }
            Err(err) => {
                // Nothing was applied locally, so nothing to roll back.
                self.host.toast(
                    &format!("{}: {err}", session.t("error_saving")),
                    ToastLevel::Error,
                );
            }
        }
    }

    /// Delete an entry after interactive confirmation.
    ///
    /// Declining the prompt issues no request; the row is only removed after
    /// the backend confirms the delete.
    pub async fn delete_word(&mut self, session: &mut Session, word: &str) {
        let (Some(kind), Some(chat_id)) = (self.kind, Self::selected_chat(session)) else {
            return;
        };

        let prompt = format!("{} \"{word}\"?", session.t("confirm_delete_word"));
        if !self.host.confirm(&prompt) {
            return;
        }

        let result = match kind {
            ListKind::Blocklist => self.api.delete_spam_word(chat_id, word).await,
            ListKind::Whitelist => self.api.delete_whitelist_word(chat_id, word).await,
        };

        match result {
            Ok(()) => {
                self.view.entries.retain(|entry| entry.word != word);
                self.host
                    .toast(&session.t("word_deleted"), ToastLevel::Info);
            }
            Err(err) => {
                warn!(%err, word, "failed to delete word");
                self.host
                    .toast(&session.t("error_saving"), ToastLevel::Error);
            }
        }
    }
}
