//! Host facade and shared view-state primitives.
//!
//! The Telegram Mini App host owns alerts, toasts, haptics, confirmation
//! dialogs and the back button. Components talk to it through the [`Host`]
//! trait so they can be driven headless in tests.

use std::sync::Arc;

use tracing::{error, info};

use crate::models::ChatScope;

/// Severity of a transient toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Haptic feedback kinds the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Success,
    Error,
}

/// The host-provided UI surface.
///
/// Toasts are non-blocking and auto-dismiss (~2.5s on the real host); alerts
/// block until acknowledged and are reserved for flow-blocking failures.
pub trait Host: Send + Sync {
    fn alert(&self, message: &str);
    fn toast(&self, message: &str, level: ToastLevel);
    fn haptic(&self, kind: Haptic);
    /// Modal yes/no confirmation.
    fn confirm(&self, message: &str) -> bool;
    fn set_back_button(&self, visible: bool);
}

/// Host used by the headless binary: routes everything to the log and
/// auto-confirms prompts.
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn alert(&self, message: &str) {
        error!(alert = message, "host alert");
    }

    fn toast(&self, message: &str, level: ToastLevel) {
        match level {
            ToastLevel::Info => info!(toast = message, "host toast"),
            ToastLevel::Error => error!(toast = message, "host toast"),
        }
    }

    fn haptic(&self, _kind: Haptic) {}

    fn confirm(&self, message: &str) -> bool {
        info!(prompt = message, "auto-confirming prompt");
        true
    }

    fn set_back_button(&self, _visible: bool) {}
}

/// Shared handle components keep on the host.
pub type HostHandle = Arc<dyn Host>;

/// Load lifecycle of a widget that fetches its own data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// One selectable entry of a chat selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub scope: ChatScope,
    pub label: String,
}

/// View state of a chat selector widget.
#[derive(Debug, Clone, Default)]
pub struct ChatList {
    pub entries: Vec<ChatEntry>,
    pub state: LoadState,
}

impl ChatList {
    pub fn begin_loading(&mut self) {
        self.entries.clear();
        self.state = LoadState::Loading;
    }

    pub fn set_entries(&mut self, entries: Vec<ChatEntry>) {
        self.entries = entries;
        self.state = LoadState::Ready;
    }

    pub fn set_error(&mut self, message: String) {
        self.entries.clear();
        self.state = LoadState::Error(message);
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording host double for component tests.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostEvent {
        Alert(String),
        Toast(String, ToastLevel),
        Haptic(Haptic),
        BackButton(bool),
    }

    #[derive(Default)]
    pub struct RecordingHost {
        pub events: Mutex<Vec<HostEvent>>,
        confirm_answer: AtomicBool,
    }

    impl RecordingHost {
        pub fn new() -> Arc<Self> {
            let host = Self::default();
            host.confirm_answer.store(true, Ordering::Relaxed);
            Arc::new(host)
        }

        /// What the next `confirm` call returns.
        pub fn answer_confirm(&self, answer: bool) {
            self.confirm_answer.store(answer, Ordering::Relaxed);
        }

        pub fn events(&self) -> Vec<HostEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn alerts(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    HostEvent::Alert(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        pub fn toasts(&self) -> Vec<(String, ToastLevel)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    HostEvent::Toast(m, l) => Some((m, l)),
                    _ => None,
                })
                .collect()
        }

        pub fn haptics(&self) -> Vec<Haptic> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    HostEvent::Haptic(k) => Some(k),
                    _ => None,
                })
                .collect()
        }
    }

    impl Host for RecordingHost {
        fn alert(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(HostEvent::Alert(message.to_string()));
        }

        fn toast(&self, message: &str, level: ToastLevel) {
            self.events
                .lock()
                .unwrap()
                .push(HostEvent::Toast(message.to_string(), level));
        }

        fn haptic(&self, kind: Haptic) {
            self.events.lock().unwrap().push(HostEvent::Haptic(kind));
        }

        fn confirm(&self, _message: &str) -> bool {
            self.confirm_answer.load(Ordering::Relaxed)
        }

        fn set_back_button(&self, visible: bool) {
            self.events
                .lock()
                .unwrap()
                .push(HostEvent::BackButton(visible));
        }
    }
}
