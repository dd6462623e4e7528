//! Host identity handling.
//!
//! The Telegram Mini App host injects the current user as a JSON object.
//! Nothing else in the panel may run until that object has been parsed; a
//! missing or empty identity is a fatal, non-recoverable error.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the host identity could not be established.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("host did not provide a user object")]
    Missing,

    #[error("host user object is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("host user object carries no user ID")]
    Empty,
}

/// The host-provided user, immutable for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// 0 when the host object carries no id; treated as empty.
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl Identity {
    /// Parse the user object out of the host init data.
    ///
    /// Gates all further initialization: callers must abort on error before
    /// issuing any network request.
    pub fn from_init_data(raw: Option<&str>) -> Result<Self, IdentityError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let raw = raw.ok_or(IdentityError::Missing)?;

        let identity: Identity = serde_json::from_str(raw)?;
        if identity.id == 0 {
            return Err(IdentityError::Empty);
        }
        Ok(identity)
    }

    /// Language the host reports for this user, defaulting to English.
    pub fn language(&self) -> &str {
        self.language_code.as_deref().unwrap_or("en")
    }

    /// Value of the `X-User-Data` header: base64 over the JSON serialization.
    pub fn transport_encoding(&self) -> String {
        // Serialization of a plain struct cannot fail.
        let json = serde_json::to_string(self).unwrap_or_default();
        STANDARD.encode(json.as_bytes())
    }
}
