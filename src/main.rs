//! modpanel - admin panel client for a Telegram group-moderation bot
//!
//! Synchronizes per-chat moderation settings, punishment rules, word lists
//! and statistics with the bot's web backend.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `identity` - Host identity gate and transport encoding
//! - `api` - REST client with the `X-User-Data` header on every call
//! - `i18n` - Translation loading with English fallback
//! - `router` / `session` - Page navigation and typed session state
//! - `settings` / `wordlist` / `stats` - The three data-driven pages
//! - `ui` - Host facade (alerts, toasts, haptics, confirmations)
//! - `prefs` - Persisted theme/language choice

mod api;
mod config;
mod i18n;
mod identity;
mod models;
mod panel;
mod prefs;
mod router;
mod session;
mod settings;
mod stats;
mod ui;
mod wordlist;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{HttpTransport, Transport};
use config::Config;
use models::{SettingKey, SettingValue};
use panel::Panel;
use prefs::Prefs;
use router::Page;
use session::StatsPeriod;
use ui::{ConsoleHost, HostHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modpanel=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting modpanel...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!(backend = %config.backend_url, "Using backend");

    let prefs_path = Prefs::default_path();
    let prefs = prefs_path.as_deref().map(Prefs::load).unwrap_or_default();
    info!(theme = ?prefs.theme, lang = ?prefs.language, "Preferences loaded");

    let host: HostHandle = Arc::new(ConsoleHost);

    // Identity gates everything: no network before it parses.
    let mut panel = Panel::bootstrap(&config, host, prefs, prefs_path, |identity| {
        Ok(Arc::new(HttpTransport::new(&config.backend_url, identity)?) as Arc<dyn Transport>)
    })
    .await?;
    info!(
        user_id = panel.session.identity.id,
        "panel session started on the home page"
    );

    // Headless smoke navigation: walk the pages once so a misconfigured
    // backend surfaces at startup instead of on first click.
    panel.show_page(Page::Settings).await;
    info!(
        chats = panel.settings.chats.entries.len(),
        "settings chat list loaded"
    );

    if let Some(entry) = panel.settings.chats.entries.first().cloned() {
        panel
            .settings
            .select_chat(&mut panel.session, Some(entry.scope))
            .await;
        info!(chat = %entry.label, "loaded settings for first manageable chat");

        // Idempotent write-backs of the current values; a broken save path
        // surfaces at startup instead of on the first real edit.
        let threshold = panel.settings.form.settings.spam_threshold;
        panel
            .settings
            .update_setting(
                &mut panel.session,
                SettingKey::SpamThreshold,
                SettingValue::Number(i64::from(threshold)),
            )
            .await;
        if let Some(rule) = panel.settings.form.punishments.first().cloned() {
            panel
                .settings
                .update_punishment(&mut panel.session, rule.level, rule.action, rule.duration_secs)
                .await;
        }

        panel
            .wordlist
            .show(&mut panel.session, wordlist::ListKind::Blocklist)
            .await;
        if panel.wordlist.view.visible {
            info!(
                entries = panel.wordlist.view.entries.len(),
                "blocklist loaded"
            );
            panel.wordlist.hide();
        }
    }

    panel.show_page(Page::Stats).await;
    if let Some(entry) = panel.stats.chats.entries.first().cloned() {
        if let Some(chat_id) = entry.scope.chat_id() {
            panel.stats.select_chat(&mut panel.session, Some(chat_id)).await;
            if panel.stats.view.visible {
                info!(
                    chat = %entry.label,
                    messages = %panel.stats.view.summary.total_messages,
                    growth = %panel.stats.view.summary.user_growth,
                    captcha = %panel.stats.view.summary.captcha_rate,
                    "loaded statistics for first manageable chat"
                );
            }
            panel
                .stats
                .set_period(&mut panel.session, StatsPeriod::Month)
                .await;
        }
    }

    panel.show_page(Page::Home).await;

    // First launch: remember the language the session settled on.
    if panel.prefs.language.is_none() {
        let lang = config
            .language
            .clone()
            .unwrap_or_else(|| panel.session.identity.language().to_string());
        panel.change_language(&lang).await;
        info!(%lang, "language preference saved");
    }
    if let Some(theme) = config.theme {
        panel.set_theme(theme);
        info!(?theme, "theme preference saved");
    }

    info!("panel ready");

    Ok(())
}
