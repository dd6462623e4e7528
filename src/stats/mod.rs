//! Statistics dashboard.
//!
//! Fetches the per-chat snapshot for a chosen period, derives the summary
//! metrics, feeds the chart pipelines and builds the violator leaderboard.
//! A failed load shows an explicit empty state instead of stale data.

pub mod chart;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::{ChatScope, StatsSnapshot, Violator};
use crate::session::{Session, StatsPeriod};
use crate::ui::{ChatEntry, ChatList, HostHandle, ToastLevel};
use chart::{Dimensions, DrawCommand, Series};

const ACCENT_COLOR: &str = "#007aff";
const DELETED_COLOR: &str = "#e74c3c";

const ACTIVITY_DIMS: Dimensions = Dimensions {
    width: 340.0,
    height: 150.0,
    scale: 2.0,
};
const HOURLY_DIMS: Dimensions = Dimensions {
    width: 340.0,
    height: 100.0,
    scale: 2.0,
};

/// Captcha pass rate as a whole percentage; 0 when nobody attempted one.
pub fn captcha_pass_rate(passed: u64, failed: u64) -> u32 {
    let total = passed + failed;
    if total == 0 {
        return 0;
    }
    ((passed as f64 / total as f64) * 100.0).round() as u32
}

/// Signed net member growth, e.g. "+6" or "-3".
pub fn growth_label(joined: i64, left: i64) -> String {
    let growth = joined - left;
    if growth >= 0 {
        format!("+{growth}")
    } else {
        growth.to_string()
    }
}

/// Compact display form: 1500 → "1.5K".
pub fn format_number(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}K", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

/// Short day label for chart ticks: "2026-08-05" → "5.8".
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%-d.%-m").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Summary cards at the top of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct SummaryCards {
    pub total_messages: String,
    pub spam_blocked: String,
    pub user_growth: String,
    pub captcha_rate: String,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolatorRow {
    pub name: String,
    pub count_label: String,
}

/// Current-status panel below the charts.
#[derive(Debug, Clone, Default)]
pub struct StatusPanel {
    pub captcha_enabled: bool,
    pub spam_filter_enabled: bool,
    pub spam_threshold: u32,
    pub warned_users: String,
    pub blocklist_size: u64,
    pub whitelist_size: u64,
}

/// View state of the statistics page.
#[derive(Debug, Clone, Default)]
pub struct StatsView {
    pub visible: bool,
    /// Explicit no-data panel shown when a load fails
    pub empty_state: bool,
    pub summary: SummaryCards,
    pub activity_chart: Vec<DrawCommand>,
    pub hourly_chart: Vec<DrawCommand>,
    pub violators: Vec<ViolatorRow>,
    /// Placeholder shown instead of an empty leaderboard
    pub violators_placeholder: Option<String>,
    pub status: StatusPanel,
}

/// Statistics page component.
pub struct StatsDashboard {
    api: ApiClient,
    host: HostHandle,
    export_dir: PathBuf,
    /// Last successfully rendered snapshot, kept so labels can be re-derived
    snapshot: Option<StatsSnapshot>,
    pub chats: ChatList,
    pub view: StatsView,
}

impl StatsDashboard {
    pub fn new(api: ApiClient, host: HostHandle, export_dir: PathBuf) -> Self {
        Self {
            api,
            host,
            export_dir,
            snapshot: None,
            chats: ChatList::default(),
            view: StatsView::default(),
        }
    }

    /// Fetch the chat selector entries; independent of the settings page.
    pub async fn load_chats(&mut self, session: &mut Session) {
        self.chats.begin_loading();

        match self.api.my_chats().await {
            Ok(list) => {
                session.stats_chats_loaded = true;
                self.chats.set_entries(
                    list.into_iter()
                        .map(|chat| ChatEntry {
                            scope: ChatScope::Chat(chat.id),
                            label: chat.name,
                        })
                        .collect(),
                );
            }
            Err(err) => {
                warn!(%err, "failed to load chats for stats");
                self.host
                    .alert(&format!("{}: {err}", session.t("error_loading_chats")));
                self.chats.set_error(err.to_string());
            }
        }
    }

    /// React to a selector change. `None` collapses the dashboard.
    pub async fn select_chat(&mut self, session: &mut Session, chat_id: Option<i64>) {
        session.stats_chat = chat_id;
        match chat_id {
            Some(_) => self.load_stats(session).await,
            None => self.view.visible = false,
        }
    }

    /// Switch the exclusive period choice and reload if a chat is selected.
    pub async fn set_period(&mut self, session: &mut Session, period: StatsPeriod) {
        session.period = period;
        if session.stats_chat.is_some() {
            self.load_stats(session).await;
        }
    }

    /// Fetch and render the snapshot for the selected (chat, period) pair.
    pub async fn load_stats(&mut self, session: &mut Session) {
        let Some(chat_id) = session.stats_chat else {
            return;
        };

        self.view.visible = false;
        self.view.empty_state = false;

        match self.api.stats(chat_id, session.period.days()).await {
            Ok(snapshot) => {
                self.render(session, &snapshot);
                self.snapshot = Some(snapshot);
                self.view.visible = true;
            }
            Err(err) => {
                warn!(%err, chat_id, "failed to load stats");
                self.snapshot = None;
                self.view.empty_state = true;
            }
        }
    }

    /// Re-derive the translated labels from the rendered snapshot.
    pub fn refresh_translations(&mut self, session: &Session) {
        if let Some(snapshot) = self.snapshot.clone() {
            self.render(session, &snapshot);
        }
    }

    /// Derive every displayed value from the snapshot.
    fn render(&mut self, session: &Session, snapshot: &StatsSnapshot) {
        let totals = &snapshot.historical.totals;

        self.view.summary = SummaryCards {
            total_messages: format_number(totals.total_messages),
            spam_blocked: format_number(totals.total_deleted),
            user_growth: growth_label(totals.total_joined, totals.total_left),
            captcha_rate: format!(
                "{}%",
                captcha_pass_rate(totals.total_captcha_passed, totals.total_captcha_failed)
            ),
        };

        let daily = &snapshot.historical.daily;
        let labels: Vec<String> = daily.iter().map(|d| day_label(&d.date)).collect();
        let series = [
            Series {
                color: ACCENT_COLOR.to_string(),
                points: daily.iter().map(|d| d.messages_total as f64).collect(),
            },
            Series {
                color: DELETED_COLOR.to_string(),
                points: daily.iter().map(|d| d.messages_deleted as f64).collect(),
            },
        ];
        self.view.activity_chart = chart::line_chart(&labels, &series, ACTIVITY_DIMS);

        let buckets = chart::hourly_buckets(&snapshot.historical.hourly_activity);
        self.view.hourly_chart = chart::bar_chart(&buckets, ACCENT_COLOR, HOURLY_DIMS);

        self.render_violators(session, &snapshot.historical.top_violators);

        let current = &snapshot.current;
        self.view.status = StatusPanel {
            captcha_enabled: current.settings.captcha_enabled,
            spam_filter_enabled: current.settings.spam_filter_enabled,
            spam_threshold: current.settings.spam_threshold,
            warned_users: session
                .t("warned_users_format")
                .replace("{users}", &current.warnings.users_with_warnings.to_string())
                .replace("{warnings}", &current.warnings.total_warnings.to_string()),
            blocklist_size: current.blocklist_count,
            whitelist_size: current.whitelist_count,
        };
    }

    fn render_violators(&mut self, session: &Session, violators: &[Violator]) {
        if violators.is_empty() {
            self.view.violators.clear();
            self.view.violators_placeholder = Some(session.t("no_violators"));
            return;
        }

        self.view.violators_placeholder = None;
        self.view.violators = violators
            .iter()
            .map(|v| ViolatorRow {
                name: format!("ID: {}", v.user_id),
                count_label: session
                    .t("violations_count")
                    .replace("{count}", &v.violation_count.to_string()),
            })
            .collect();
    }

    /// Download the full history as CSV into the export directory.
    ///
    /// Named `stats_{chat_id}_{ISO date}.csv`; failure raises a blocking
    /// alert since nothing was written.
    pub async fn export(&mut self, session: &mut Session) {
        let Some(chat_id) = session.stats_chat else {
            self.host.alert(&session.t("select_chat_first"));
            return;
        };

        match self.api.export_csv(chat_id).await {
            Ok(csv) => {
                let filename = format!(
                    "stats_{chat_id}_{}.csv",
                    Utc::now().date_naive().format("%Y-%m-%d")
                );
                let path = self.export_dir.join(filename);
                if let Err(err) = std::fs::write(&path, csv) {
                    warn!(%err, path = %path.display(), "failed to write export");
                    self.host.alert(&session.t("export_failed"));
                    return;
                }
                info!(path = %path.display(), "stats exported");
                self.host
                    .toast(&format!("✅ {}", session.t("stats_exported")), ToastLevel::Info);
            }
            Err(err) => {
                warn!(%err, chat_id, "failed to export stats");
                self.host.alert(&session.t("export_failed"));
            }
        }
    }
}
