//! Panel orchestrator.
//!
//! Wires the components together and enforces the startup order: the host
//! identity gates everything, the initial translation load completes before
//! the home page shows, and page navigation drives the lazy chat-list loads.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{ApiClient, Transport};
use crate::config::Config;
use crate::i18n::{self, TextBinding, TextSlot};
use crate::identity::Identity;
use crate::prefs::{Prefs, Theme};
use crate::router::{LazyLoad, Page, Router};
use crate::session::Session;
use crate::settings::SettingsClient;
use crate::stats::StatsDashboard;
use crate::ui::HostHandle;
use crate::wordlist::WordListManager;

/// Fatal-alert text shown before translations exist.
const IDENTITY_ALERT: &str = "Could not identify the user. Please relaunch the Web App.";

/// The assembled panel session.
pub struct Panel {
    pub session: Session,
    pub router: Router,
    pub settings: SettingsClient,
    pub wordlist: WordListManager,
    pub stats: StatsDashboard,
    /// Page-chrome labels, re-applied on every language change
    pub chrome: Vec<TextBinding>,
    pub prefs: Prefs,
    prefs_path: Option<PathBuf>,
    api: ApiClient,
}

impl Panel {
    /// Gate on the host identity, then build every component.
    ///
    /// The transport factory only runs after the identity parses, so a
    /// missing identity issues zero network requests. The UI language is the
    /// config override, then the saved preference, then the identity's code.
    pub async fn bootstrap<F>(
        config: &Config,
        host: HostHandle,
        prefs: Prefs,
        prefs_path: Option<PathBuf>,
        make_transport: F,
    ) -> anyhow::Result<Self>
    where
        F: FnOnce(&Identity) -> anyhow::Result<Arc<dyn Transport>>,
    {
        let identity = match Identity::from_init_data(config.init_user.as_deref()) {
            Ok(identity) => identity,
            Err(err) => {
                host.alert(IDENTITY_ALERT);
                return Err(err.into());
            }
        };
        info!(user_id = identity.id, "host identity established");

        let transport = make_transport(&identity)?;
        let api = ApiClient::new(transport);

        let lang = config
            .language
            .clone()
            .or_else(|| prefs.language.clone())
            .unwrap_or_else(|| identity.language().to_string());
        let mut session = Session::new(identity);
        session.translations = i18n::load(&api, &lang).await;

        let mut chrome = Self::chrome_bindings();
        session.translations.apply(&mut chrome);

        let settings = SettingsClient::new(api.clone(), host.clone(), config.admin_id);
        let wordlist = WordListManager::new(api.clone(), host.clone());
        let stats = StatsDashboard::new(api.clone(), host.clone(), config.export_dir.clone());

        Ok(Self {
            session,
            router: Router::new(),
            settings,
            wordlist,
            stats,
            chrome,
            prefs,
            prefs_path,
            api,
        })
    }

    /// Static page labels filled from the translation table.
    fn chrome_bindings() -> Vec<TextBinding> {
        vec![
            TextBinding::new("home_title", TextSlot::Content),
            TextBinding::new("settings_title", TextSlot::Content),
            TextBinding::new("stats_title", TextSlot::Content),
            TextBinding::new("new_word_placeholder", TextSlot::Placeholder),
        ]
    }

    /// Navigate; first shows of the settings/stats pages load their chats.
    pub async fn show_page(&mut self, page: Page) {
        match self.router.show(page) {
            Some(LazyLoad::SettingsChats) => {
                self.settings.load_user_chats(&mut self.session).await;
            }
            Some(LazyLoad::StatsChats) => {
                self.stats.load_chats(&mut self.session).await;
            }
            None => {}
        }
    }

    /// Switch the UI language: reload the table, re-apply every translated
    /// label and persist the choice.
    pub async fn change_language(&mut self, lang: &str) {
        self.session.translations = i18n::load(&self.api, lang).await;
        self.session.translations.apply(&mut self.chrome);
        self.settings.refresh_translations(&self.session);
        self.wordlist.refresh_translations(&self.session);
        self.stats.refresh_translations(&self.session);

        self.prefs.language = Some(lang.to_string());
        self.persist_prefs();
    }

    /// Switch the color theme and persist the choice.
    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.persist_prefs();
    }

    fn persist_prefs(&self) {
        let Some(path) = &self.prefs_path else {
            return;
        };
        if let Err(err) = self.prefs.save(path) {
            warn!(%err, path = %path.display(), "failed to persist preferences");
        }
    }
}
