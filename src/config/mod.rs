//! Configuration module for the panel client.
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::prefs::Theme;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the bot's web backend
    pub backend_url: String,

    /// User ID allowed to see and edit the global default settings
    pub admin_id: i64,

    /// Host-provided user object (JSON), as injected into the Web App.
    /// Absent when the panel is launched outside the host.
    pub init_user: Option<String>,

    /// Language override; falls back to the host identity's language.
    pub language: Option<String>,

    /// Theme override, persisted into the preferences when set.
    pub theme: Option<Theme>,

    /// Where CSV exports are written
    pub export_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_id = env::var("ADMIN_ID")
            .expect("ADMIN_ID must be set")
            .trim()
            .parse::<i64>()
            .expect("ADMIN_ID must be a number");

        let language = env::var("PANEL_LANG")
            .ok()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let theme = env::var("PANEL_THEME")
            .ok()
            .and_then(|s| match s.trim().to_lowercase().as_str() {
                "dark" => Some(Theme::Dark),
                "light" => Some(Theme::Light),
                _ => None,
            });

        let export_dir = env::var("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            backend_url: env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
            admin_id,
            init_user: env::var("TG_INIT_USER").ok(),
            language,
            theme,
            export_dir,
        }
    }
}
