//! Settings page client.
//!
//! Loads the caller's manageable chats, the per-chat (or global) moderation
//! settings and the punishment-escalation rules, and pushes field-by-field
//! edits to the backend. The server is authoritative: a failed save notifies
//! the user and re-fetches the current scope so the form resynchronizes.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{ChatScope, ChatSettings, PunishmentAction, PunishmentRule, SettingKey, SettingValue};
use crate::session::{Session, WriteField};
use crate::ui::{ChatEntry, ChatList, Haptic, HostHandle, ToastLevel};

/// View state of the settings form.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub visible: bool,
    pub loading: bool,
    pub settings: ChatSettings,

    /// Blocklist/whitelist management buttons; hidden for the global scope
    pub list_controls_visible: bool,

    /// Punishment-rules panel; hidden for the global scope
    pub punishments_visible: bool,
    pub punishments: Vec<PunishmentRule>,
}

/// Settings page component.
pub struct SettingsClient {
    api: ApiClient,
    host: HostHandle,
    /// Identity allowed to edit the global defaults
    admin_id: i64,
    pub chats: ChatList,
    pub form: SettingsForm,
}

impl SettingsClient {
    pub fn new(api: ApiClient, host: HostHandle, admin_id: i64) -> Self {
        Self {
            api,
            host,
            admin_id,
            chats: ChatList::default(),
            form: SettingsForm::default(),
        }
    }

    /// Fetch the caller's manageable chats into the selector.
    ///
    /// The designated admin additionally gets the synthetic "global defaults"
    /// entry prepended. Failure leaves the selector in an error state and
    /// raises a blocking alert; other widgets are unaffected.
    pub async fn load_user_chats(&mut self, session: &mut Session) {
        self.chats.begin_loading();

        match self.api.my_chats().await {
            Ok(list) => {
                session.settings_chats_loaded = true;

                let mut entries = Vec::with_capacity(list.len() + 1);
                if session.identity.id == self.admin_id {
                    entries.push(ChatEntry {
                        scope: ChatScope::Global,
                        label: format!("⚙️ {}", session.t("default_settings")),
                    });
                }
                entries.extend(list.into_iter().map(|chat| ChatEntry {
                    scope: ChatScope::Chat(chat.id),
                    label: chat.name,
                }));
                self.chats.set_entries(entries);
            }
            Err(err) => {
                warn!(%err, "failed to load user chats");
                self.host
                    .alert(&format!("{}: {err}", session.t("error_loading_chats")));
                self.chats.set_error(err.to_string());
            }
        }
    }

    /// Re-label the synthetic global entry after a language change.
    pub fn refresh_translations(&mut self, session: &Session) {
        for entry in &mut self.chats.entries {
            if entry.scope.is_global() {
                entry.label = format!("⚙️ {}", session.t("default_settings"));
            }
        }
    }

    /// React to a selector change. `None` collapses the form.
    pub async fn select_chat(&mut self, session: &mut Session, scope: Option<ChatScope>) {
        session.selected_chat = scope;
        match scope {
            Some(scope) => self.load_chat_settings(session, scope).await,
            None => self.form.visible = false,
        }
    }

    /// Fetch settings (and punishment rules for concrete chats) into the form.
    ///
    /// On failure the error is surfaced but the form is still revealed so the
    /// page never sticks in a loading state.
    pub async fn load_chat_settings(&mut self, session: &mut Session, scope: ChatScope) {
        self.form.loading = true;
        self.form.visible = false;
        self.form.list_controls_visible = !scope.is_global();
        self.form.punishments_visible = !scope.is_global();

        match self.api.chat_settings(scope).await {
            Ok(settings) => self.form.settings = settings,
            Err(err) => {
                warn!(%err, ?scope, "failed to load chat settings");
                self.host.alert(&err.to_string());
            }
        }

        if let Some(chat_id) = scope.chat_id() {
            match self.api.punishments(chat_id).await {
                Ok(rules) => self.form.punishments = rules,
                Err(err) => {
                    warn!(%err, chat_id, "failed to load punishment rules");
                    self.form.punishments.clear();
                }
            }
        } else {
            self.form.punishments.clear();
        }

        self.form.loading = false;
        self.form.visible = true;
    }

    /// Push one `{key, value}` edit for the selected scope.
    ///
    /// Out-of-range values are dropped locally without a request. A failed
    /// save notifies and re-fetches the authoritative settings exactly once;
    /// a response superseded by a newer edit of the same field is discarded.
    pub async fn update_setting(
        &mut self,
        session: &mut Session,
        key: SettingKey,
        value: SettingValue,
    ) {
        let Some(scope) = session.selected_chat else {
            return;
        };
        if !key.accepts(&value) {
            debug!(key = key.as_str(), ?value, "dropping out-of-range edit");
            return;
        }

        let generation = session.generations.begin(WriteField::Setting(key));
        match self.api.update_setting(scope, key, &value).await {
            Ok(()) => {
                if !session
                    .generations
                    .is_current(WriteField::Setting(key), generation)
                {
                    return;
                }
                self.form.settings.apply(key, &value);
                self.host.haptic(Haptic::Success);
                self.host
                    .toast(&format!("✅ {}", session.t("changes_saved")), ToastLevel::Info);
            }
            Err(err) => {
                self.host.haptic(Haptic::Error);
                self.host.toast(
                    &format!("❌ {}: {err}", session.t("error_saving")),
                    ToastLevel::Error,
                );
                if session
                    .generations
                    .is_current(WriteField::Setting(key), generation)
                {
                    self.load_chat_settings(session, scope).await;
                }
            }
        }
    }

    /// Push one punishment rule; duration is forced to 0 for bans.
    pub async fn update_punishment(
        &mut self,
        session: &mut Session,
        level: u8,
        action: PunishmentAction,
        duration_secs: u64,
    ) {
        let Some(scope) = session.selected_chat else {
            return;
        };
        let Some(chat_id) = scope.chat_id() else {
            // No punishment rules on the global scope; the panel is hidden.
            return;
        };

        let rule = PunishmentRule::new(level, action, duration_secs);
        let generation = session.generations.begin(WriteField::Punishment(level));
        match self.api.update_punishment(chat_id, &rule).await {
            Ok(()) => {
                if !session
                    .generations
                    .is_current(WriteField::Punishment(level), generation)
                {
                    return;
                }
                match self.form.punishments.iter_mut().find(|r| r.level == level) {
                    Some(existing) => *existing = rule,
                    None => self.form.punishments.push(rule),
                }
                self.host.haptic(Haptic::Success);
                self.host
                    .toast(&format!("✅ {}", session.t("changes_saved")), ToastLevel::Info);
            }
            Err(err) => {
                self.host.haptic(Haptic::Error);
                self.host.toast(
                    &format!("❌ {}: {err}", session.t("error_saving")),
                    ToastLevel::Error,
                );
                if session
                    .generations
                    .is_current(WriteField::Punishment(level), generation)
                {
                    self.load_chat_settings(session, scope).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::identity::Identity;
    use crate::ui::LoadState;
    use crate::ui::testing::RecordingHost;

    const ADMIN_ID: i64 = 384349957;

    fn session_for(user_id: i64) -> Session {
        let identity = Identity::from_init_data(Some(&format!(
            r#"{{"id": {user_id}, "first_name": "Test"}}"#
        )))
        .unwrap();
        Session::new(identity)
    }

    fn client(transport: std::sync::Arc<FakeTransport>) -> (SettingsClient, std::sync::Arc<RecordingHost>) {
        let host = RecordingHost::new();
        let client = SettingsClient::new(ApiClient::new(transport), host.clone(), ADMIN_ID);
        (client, host)
    }

    #[tokio::test]
    async fn test_admin_gets_synthetic_global_entry() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::GET,
            "/api/my-chats",
            json!([{ "id": -100, "name": "Group A" }]),
        );
        let (mut client, _host) = client(transport);

        let mut session = session_for(ADMIN_ID);
        client.load_user_chats(&mut session).await;

        assert!(session.settings_chats_loaded);
        assert_eq!(client.chats.entries.len(), 2);
        assert_eq!(client.chats.entries[0].scope, ChatScope::Global);
        assert_eq!(client.chats.entries[1].scope, ChatScope::Chat(-100));
    }

    #[tokio::test]
    async fn test_refresh_relabels_global_entry() {
        let transport = FakeTransport::new();
        transport.respond(Method::GET, "/api/my-chats", json!([]));
        let (mut client, _host) = client(transport);

        let mut session = session_for(ADMIN_ID);
        client.load_user_chats(&mut session).await;
        assert_eq!(client.chats.entries[0].label, "⚙️ [default_settings]");

        session.translations = crate::i18n::Translations::merged(
            std::collections::HashMap::from([(
                "default_settings".to_string(),
                "Типові налаштування".to_string(),
            )]),
            std::collections::HashMap::new(),
        );
        client.refresh_translations(&session);
        assert_eq!(client.chats.entries[0].label, "⚙️ Типові налаштування");
    }

    #[tokio::test]
    async fn test_regular_admin_gets_no_global_entry() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::GET,
            "/api/my-chats",
            json!([{ "id": -100, "name": "Group A" }]),
        );
        let (mut client, _host) = client(transport);

        let mut session = session_for(1234);
        client.load_user_chats(&mut session).await;

        assert_eq!(client.chats.entries.len(), 1);
        assert_eq!(client.chats.entries[0].scope, ChatScope::Chat(-100));
    }

    #[tokio::test]
    async fn test_chat_list_failure_alerts_and_marks_error() {
        let transport = FakeTransport::new();
        transport.fail(Method::GET, "/api/my-chats", 500, "backend down");
        let (mut client, host) = client(transport);

        let mut session = session_for(1234);
        client.load_user_chats(&mut session).await;

        assert!(matches!(client.chats.state, LoadState::Error(_)));
        assert!(!session.settings_chats_loaded);
        assert_eq!(host.alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_global_scope_hides_lists_and_punishments() {
        let transport = FakeTransport::new();
        transport.respond(Method::GET, "/api/settings/global", json!({}));
        let (mut client, _host) = client(transport);

        let mut session = session_for(ADMIN_ID);
        client
            .select_chat(&mut session, Some(ChatScope::Global))
            .await;

        assert!(client.form.visible);
        assert!(!client.form.list_controls_visible);
        assert!(!client.form.punishments_visible);
        assert!(client.form.punishments.is_empty());
    }

    #[tokio::test]
    async fn test_concrete_chat_loads_settings_and_rules() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::GET,
            "/api/settings/-100",
            json!({ "captcha_enabled": true, "spam_threshold": 20 }),
        );
        transport.respond(
            Method::GET,
            "/api/punishments/-100",
            json!([{ "level": 3, "action": "mute", "duration_secs": 600 }]),
        );
        let (mut client, _host) = client(transport);

        let mut session = session_for(1234);
        client
            .select_chat(&mut session, Some(ChatScope::Chat(-100)))
            .await;

        assert!(client.form.visible);
        assert!(!client.form.loading);
        assert!(client.form.list_controls_visible);
        assert!(client.form.punishments_visible);
        assert!(client.form.settings.captcha_enabled);
        assert_eq!(client.form.settings.spam_threshold, 20);
        assert_eq!(client.form.punishments.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_threshold_sends_no_request() {
        let transport = FakeTransport::new();
        let (mut client, host) = client(transport.clone());

        let mut session = session_for(1234);
        session.selected_chat = Some(ChatScope::Chat(-100));

        client
            .update_setting(&mut session, SettingKey::SpamThreshold, SettingValue::Number(70))
            .await;
        client
            .update_setting(&mut session, SettingKey::SpamThreshold, SettingValue::Number(4))
            .await;

        assert!(transport.calls().is_empty());
        assert!(host.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_in_range_threshold_sends_exactly_one_request() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::POST,
            "/api/settings/-100",
            json!({ "status": "success" }),
        );
        let (mut client, host) = client(transport.clone());

        let mut session = session_for(1234);
        session.selected_chat = Some(ChatScope::Chat(-100));

        client
            .update_setting(&mut session, SettingKey::SpamThreshold, SettingValue::Number(25))
            .await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            Some(json!({ "key": "spam_threshold", "value": 25 }))
        );
        assert_eq!(client.form.settings.spam_threshold, 25);
        assert_eq!(host.haptics(), vec![Haptic::Success]);
    }

    #[tokio::test]
    async fn test_failed_save_resyncs_settings_exactly_once() {
        let transport = FakeTransport::new();
        transport.fail(Method::POST, "/api/settings/-100", 500, "db locked");
        transport.respond(Method::GET, "/api/settings/-100", json!({ "spam_threshold": 15 }));
        transport.respond(Method::GET, "/api/punishments/-100", json!([]));
        let (mut client, host) = client(transport.clone());

        let mut session = session_for(1234);
        session.selected_chat = Some(ChatScope::Chat(-100));

        client
            .update_setting(&mut session, SettingKey::CaptchaEnabled, SettingValue::Flag(true))
            .await;

        assert_eq!(transport.count(Method::GET, "/api/settings/-100"), 1);
        assert_eq!(client.form.settings.spam_threshold, 15);
        assert_eq!(host.haptics(), vec![Haptic::Error]);
        let toasts = host.toasts();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].0.contains("db locked"));
        assert_eq!(toasts[0].1, ToastLevel::Error);
    }

    #[tokio::test]
    async fn test_ban_punishment_is_sent_with_zero_duration() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::POST,
            "/api/punishments/-100",
            json!({ "status": "success" }),
        );
        let (mut client, _host) = client(transport.clone());

        let mut session = session_for(1234);
        session.selected_chat = Some(ChatScope::Chat(-100));

        client
            .update_punishment(&mut session, 5, PunishmentAction::Ban, 3600)
            .await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            Some(json!({ "level": 5, "action": "ban", "duration": 0 }))
        );
    }

    #[tokio::test]
    async fn test_punishment_update_on_global_scope_is_ignored() {
        let transport = FakeTransport::new();
        let (mut client, _host) = client(transport.clone());

        let mut session = session_for(ADMIN_ID);
        session.selected_chat = Some(ChatScope::Global);

        client
            .update_punishment(&mut session, 1, PunishmentAction::Mute, 60)
            .await;

        assert!(transport.calls().is_empty());
    }
}
