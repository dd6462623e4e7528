//! Shared REST client for the bot's web backend.
//!
//! Every request carries the transport-encoded identity in the `X-User-Data`
//! header. Non-2xx responses carry a `{detail}` body that becomes the
//! user-facing error message where available.
//!
//! The wire is hidden behind the [`Transport`] trait so components can be
//! exercised against an in-memory backend in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::identity::Identity;
use crate::models::{Chat, ChatScope, ChatSettings, PunishmentRule, SettingKey, SettingValue, StatsSnapshot};

/// Header carrying the encoded identity (`X-User-Data` on the wire), checked
/// by the backend on every call.
pub const USER_DATA_HEADER: &str = "x-user-data";

/// Errors surfaced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `detail` is the backend's message when present.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("identity cannot be encoded as a header value")]
    InvalidHeader,
}

/// One JSON request/response exchange with the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>)
    -> Result<Value, ApiError>;
}

/// Production transport over reqwest.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport that authenticates as `identity` on every request.
    pub fn new(base_url: &str, identity: &Identity) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let encoded = HeaderValue::from_str(&identity.transport_encoding())
            .map_err(|_| ApiError::InvalidHeader)?;
        headers.insert(USER_DATA_HEADER, encoded);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "backend request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("detail").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        // Status-only bodies ({"status": "success"}) are fine to return as-is.
        Ok(response.json::<Value>().await.unwrap_or(Value::Null))
    }
}

#[derive(Deserialize)]
struct CsvPayload {
    csv: String,
}

/// Typed view of the backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.transport.send(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn write(&self, method: Method, path: &str, body: Value) -> Result<(), ApiError> {
        self.transport.send(method, path, Some(body)).await?;
        Ok(())
    }

    /// Language pack for `lang`; a flat key → text table.
    pub async fn translations(&self, lang: &str) -> Result<HashMap<String, String>, ApiError> {
        self.get(&format!("/api/translations/{lang}")).await
    }

    /// Chats the caller can manage.
    pub async fn my_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.get("/api/my-chats").await
    }

    pub async fn chat_settings(&self, scope: ChatScope) -> Result<ChatSettings, ApiError> {
        self.get(&format!("/api/settings/{}", scope.path_segment()))
            .await
    }

    /// Apply one `{key, value}` settings edit.
    pub async fn update_setting(
        &self,
        scope: ChatScope,
        key: SettingKey,
        value: &SettingValue,
    ) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/api/settings/{}", scope.path_segment()),
            json!({ "key": key.as_str(), "value": value.to_json() }),
        )
        .await
    }

    pub async fn punishments(&self, chat_id: i64) -> Result<Vec<PunishmentRule>, ApiError> {
        self.get(&format!("/api/punishments/{chat_id}")).await
    }

    pub async fn update_punishment(
        &self,
        chat_id: i64,
        rule: &PunishmentRule,
    ) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/api/punishments/{chat_id}"),
            json!({
                "level": rule.level,
                "action": rule.action,
                "duration": rule.duration_secs,
            }),
        )
        .await
    }

    /// Blocklist for a chat: trigger word → score.
    pub async fn spam_words(&self, chat_id: i64) -> Result<BTreeMap<String, u32>, ApiError> {
        self.get(&format!("/api/spam-words/{chat_id}")).await
    }

    pub async fn add_spam_word(
        &self,
        chat_id: i64,
        trigger: &str,
        score: u32,
    ) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/api/spam-words/{chat_id}"),
            json!({ "trigger": trigger, "score": score }),
        )
        .await
    }

    pub async fn delete_spam_word(&self, chat_id: i64, trigger: &str) -> Result<(), ApiError> {
        self.write(
            Method::DELETE,
            &format!("/api/spam-words/{chat_id}"),
            json!({ "trigger": trigger }),
        )
        .await
    }

    pub async fn whitelist(&self, chat_id: i64) -> Result<Vec<String>, ApiError> {
        self.get(&format!("/api/whitelist/{chat_id}")).await
    }

    pub async fn add_whitelist_word(&self, chat_id: i64, word: &str) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/api/whitelist/{chat_id}"),
            json!({ "word": word }),
        )
        .await
    }

    pub async fn delete_whitelist_word(&self, chat_id: i64, word: &str) -> Result<(), ApiError> {
        self.write(
            Method::DELETE,
            &format!("/api/whitelist/{chat_id}"),
            json!({ "word": word }),
        )
        .await
    }

    pub async fn stats(&self, chat_id: i64, days: u32) -> Result<StatsSnapshot, ApiError> {
        self.get(&format!("/api/stats/{chat_id}?days={days}")).await
    }

    /// CSV export payload for the whole chat history.
    pub async fn export_csv(&self, chat_id: i64) -> Result<String, ApiError> {
        let payload: CsvPayload = self
            .get(&format!("/api/stats/{chat_id}/export?format=csv"))
            .await?;
        Ok(payload.csv)
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory transport for exercising components without a backend.

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub method: String,
        pub path: String,
        pub body: Option<Value>,
    }

    #[derive(Clone)]
    enum Outcome {
        Ok(Value),
        Err { status: u16, detail: String },
    }

    /// Scripted backend: queued responses per `METHOD path`, sticky last one.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<HashMap<String, VecDeque<Outcome>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl FakeTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn key(method: &Method, path: &str) -> String {
            format!("{method} {path}")
        }

        pub fn respond(&self, method: Method, path: &str, value: Value) {
            self.responses
                .lock()
                .unwrap()
                .entry(Self::key(&method, path))
                .or_default()
                .push_back(Outcome::Ok(value));
        }

        pub fn fail(&self, method: Method, path: &str, status: u16, detail: &str) {
            self.responses
                .lock()
                .unwrap()
                .entry(Self::key(&method, path))
                .or_default()
                .push_back(Outcome::Err {
                    status,
                    detail: detail.to_string(),
                });
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        /// How many requests hit `METHOD path`.
        pub fn count(&self, method: Method, path: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.method == method.as_str() && c.path == path)
                .count()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<Value>,
        ) -> Result<Value, ApiError> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: method.to_string(),
                path: path.to_string(),
                body,
            });

            let key = Self::key(&method, path);
            let mut responses = self.responses.lock().unwrap();
            let outcome = match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };

            match outcome {
                Some(Outcome::Ok(value)) => Ok(value),
                Some(Outcome::Err { status, detail }) => Err(ApiError::Backend { status, detail }),
                None => Err(ApiError::Backend {
                    status: 404,
                    detail: format!("no scripted response for {key}"),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_client_decodes_scripted_chats() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::GET,
            "/api/my-chats",
            json!([{ "id": -100, "name": "Test Group" }]),
        );

        let client = ApiClient::new(transport.clone());
        let chats = client.my_chats().await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].id, -100);
        assert_eq!(transport.count(Method::GET, "/api/my-chats"), 1);
    }

    #[tokio::test]
    async fn test_backend_detail_becomes_the_error_message() {
        let transport = FakeTransport::new();
        transport.fail(Method::GET, "/api/my-chats", 403, "Forbidden: not an admin");

        let client = ApiClient::new(transport.clone());
        let err = client.my_chats().await.unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: not an admin");
    }
}
