//! Page navigation.
//!
//! One page is active at a time. The first time the settings or statistics
//! page is shown, its chat list load is triggered; subsequent shows only
//! switch visibility.

/// The fixed page set of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Settings,
    Stats,
}

/// Data load a page transition may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyLoad {
    SettingsChats,
    StatsChats,
}

/// Tracks the active page and the once-only lazy-load triggers.
pub struct Router {
    active: Page,
    settings_shown: bool,
    stats_shown: bool,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Starts on the home page, nothing lazily loaded yet.
    pub fn new() -> Self {
        Self {
            active: Page::Home,
            settings_shown: false,
            stats_shown: false,
        }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    /// Activate `page`; returns the lazy load to run on its first show.
    pub fn show(&mut self, page: Page) -> Option<LazyLoad> {
        self.active = page;
        match page {
            Page::Home => None,
            Page::Settings => {
                if self.settings_shown {
                    None
                } else {
                    self.settings_shown = true;
                    Some(LazyLoad::SettingsChats)
                }
            }
            Page::Stats => {
                if self.stats_shown {
                    None
                } else {
                    self.stats_shown = true;
                    Some(LazyLoad::StatsChats)
                }
            }
        }
    }
}
