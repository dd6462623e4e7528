//! Per-chat moderation settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Moderation settings for one chat (or the global defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Whether new members must pass a captcha
    #[serde(default)]
    pub captcha_enabled: bool,

    /// Whether the spam filter is active
    #[serde(default)]
    pub spam_filter_enabled: bool,

    /// Use the bot-wide trigger list
    #[serde(default)]
    pub use_global_list: bool,

    /// Use the chat's own trigger list
    #[serde(default)]
    pub use_custom_list: bool,

    /// Score a message must accumulate before it counts as spam
    #[serde(default = "default_spam_threshold")]
    pub spam_threshold: u32,

    /// Whether flood detection is active
    #[serde(default)]
    pub antiflood_enabled: bool,

    /// Messages allowed inside the flood window
    #[serde(default = "default_antiflood_sensitivity")]
    pub antiflood_sensitivity: u32,
}

fn default_spam_threshold() -> u32 {
    10
}

fn default_antiflood_sensitivity() -> u32 {
    5
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            captcha_enabled: false,
            spam_filter_enabled: false,
            use_global_list: false,
            use_custom_list: false,
            spam_threshold: default_spam_threshold(),
            antiflood_enabled: false,
            antiflood_sensitivity: default_antiflood_sensitivity(),
        }
    }
}

/// A mutable settings field, as named by the backend update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    CaptchaEnabled,
    SpamFilterEnabled,
    UseGlobalList,
    UseCustomList,
    SpamThreshold,
    AntifloodEnabled,
    AntifloodSensitivity,
}

impl SettingKey {
    /// Wire name used in `{key, value}` update bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaptchaEnabled => "captcha_enabled",
            Self::SpamFilterEnabled => "spam_filter_enabled",
            Self::UseGlobalList => "use_global_list",
            Self::UseCustomList => "use_custom_list",
            Self::SpamThreshold => "spam_threshold",
            Self::AntifloodEnabled => "antiflood_enabled",
            Self::AntifloodSensitivity => "antiflood_sensitivity",
        }
    }

    /// Client-side validation of an edit before it is sent.
    ///
    /// Out-of-range or mistyped values are dropped without a request.
    pub fn accepts(&self, value: &SettingValue) -> bool {
        match (self, value) {
            (Self::SpamThreshold, SettingValue::Number(n)) => (5..=50).contains(n),
            (Self::AntifloodSensitivity, SettingValue::Number(n)) => (3..=15).contains(n),
            (Self::SpamThreshold | Self::AntifloodSensitivity, _) => false,
            (_, SettingValue::Flag(_)) => true,
            (_, SettingValue::Number(_)) => false,
        }
    }
}

/// Value side of a `{key, value}` settings update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Number(i64),
}

impl SettingValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Flag(b) => Value::Bool(*b),
            Self::Number(n) => Value::from(*n),
        }
    }
}

impl ChatSettings {
    /// Mirror a confirmed edit into the local copy.
    pub fn apply(&mut self, key: SettingKey, value: &SettingValue) {
        match (key, value) {
            (SettingKey::CaptchaEnabled, SettingValue::Flag(b)) => self.captcha_enabled = *b,
            (SettingKey::SpamFilterEnabled, SettingValue::Flag(b)) => {
                self.spam_filter_enabled = *b;
            }
            (SettingKey::UseGlobalList, SettingValue::Flag(b)) => self.use_global_list = *b,
            (SettingKey::UseCustomList, SettingValue::Flag(b)) => self.use_custom_list = *b,
            (SettingKey::SpamThreshold, SettingValue::Number(n)) => {
                self.spam_threshold = *n as u32;
            }
            (SettingKey::AntifloodEnabled, SettingValue::Flag(b)) => {
                self.antiflood_enabled = *b;
            }
            (SettingKey::AntifloodSensitivity, SettingValue::Number(n)) => {
                self.antiflood_sensitivity = *n as u32;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_range() {
        let key = SettingKey::SpamThreshold;
        assert!(!key.accepts(&SettingValue::Number(4)));
        assert!(key.accepts(&SettingValue::Number(5)));
        assert!(key.accepts(&SettingValue::Number(50)));
        assert!(!key.accepts(&SettingValue::Number(51)));
        assert!(!key.accepts(&SettingValue::Flag(true)));
    }

    #[test]
    fn test_sensitivity_range() {
        let key = SettingKey::AntifloodSensitivity;
        assert!(!key.accepts(&SettingValue::Number(2)));
        assert!(key.accepts(&SettingValue::Number(3)));
        assert!(key.accepts(&SettingValue::Number(15)));
        assert!(!key.accepts(&SettingValue::Number(16)));
    }

    #[test]
    fn test_toggles_take_flags_only() {
        let key = SettingKey::CaptchaEnabled;
        assert!(key.accepts(&SettingValue::Flag(false)));
        assert!(!key.accepts(&SettingValue::Number(1)));
    }

    #[test]
    fn test_apply_confirmed_edit() {
        let mut settings = ChatSettings::default();
        settings.apply(SettingKey::SpamThreshold, &SettingValue::Number(25));
        settings.apply(SettingKey::CaptchaEnabled, &SettingValue::Flag(true));
        assert_eq!(settings.spam_threshold, 25);
        assert!(settings.captcha_enabled);
    }
}
