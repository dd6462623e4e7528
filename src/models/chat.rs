//! Chat records and the settings scope they are addressed by.

use serde::{Deserialize, Serialize};

/// A Telegram group managed by the bot and visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Telegram chat ID
    pub id: i64,

    /// Group title as cached by the bot
    pub name: String,
}

/// Target of a settings request.
///
/// `Global` is a synthetic scope representing the bot-wide default settings.
/// It is never returned by the backend chat list; the client prepends it for
/// the designated admin only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatScope {
    /// Bot-wide default settings (owner only)
    Global,
    /// A concrete group
    Chat(i64),
}

impl ChatScope {
    /// Path segment used by the settings endpoints.
    pub fn path_segment(&self) -> String {
        match self {
            Self::Global => "global".to_string(),
            Self::Chat(id) => id.to_string(),
        }
    }

    /// Whether this scope addresses the global defaults.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Concrete chat ID, if any.
    pub fn chat_id(&self) -> Option<i64> {
        match self {
            Self::Global => None,
            Self::Chat(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_path_segments() {
        assert_eq!(ChatScope::Global.path_segment(), "global");
        assert_eq!(ChatScope::Chat(-100123).path_segment(), "-100123");
    }

    #[test]
    fn test_scope_chat_id() {
        assert_eq!(ChatScope::Global.chat_id(), None);
        assert_eq!(ChatScope::Chat(42).chat_id(), Some(42));
    }
}
