//! Visitor identity and session token management.
//!
//! The session token is an opaque bearer credential. Its second
//! dot-separated segment is a base64 JSON payload carrying an `exp` claim
//! (Unix seconds). A cached token is re-validated on every read and
//! reissued from the backend when it is missing, malformed or expired.
//!
//! Token failures never reach the caller: [`TokenStore::get_token`] yields
//! `None` and searches proceed unauthenticated.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::http;
use crate::store::{KeyValueStore, SESSION_TOKEN_KEY, VISITOR_ID_KEY};

/// Path of the token issuance endpoint.
pub const TOKEN_PATH: &str = "/api/visitor-token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    visitor_id: &'a str,
    user_agent: &'a str,
    site_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Read the `exp` claim of a token, if the token is well-formed.
pub fn token_expiry(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);

    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    exp.as_i64().or_else(|| exp.as_f64().map(|f| f.floor() as i64))
}

/// Whether a token must be reissued at `now` (Unix seconds).
///
/// Unparsable tokens and tokens without an `exp` claim count as expired.
pub fn is_token_expired(token: &str, now: i64) -> bool {
    match token_expiry(token) {
        Some(exp) => exp <= now,
        None => true,
    }
}

/// Caches the visitor identity and session token in a [`KeyValueStore`].
pub struct TokenStore<S> {
    store: S,
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    site_name: String,
}

impl<S: KeyValueStore> TokenStore<S> {
    /// Create a token store with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Http`] if the HTTP client cannot be built.
    pub fn new(store: S, config: &WidgetConfig) -> Result<Self, WidgetError> {
        let client = http::build_client(config)?;
        Ok(Self::with_client(store, client, config))
    }

    /// Create a token store that shares an existing HTTP client.
    pub fn with_client(store: S, client: reqwest::Client, config: &WidgetConfig) -> Self {
        Self {
            store,
            client,
            endpoint: config.endpoint(TOKEN_PATH),
            user_agent: config.user_agent.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the persisted visitor identity, creating one on first use.
    ///
    /// A store write failure is logged; the fresh identity is still
    /// returned for this page load.
    pub fn visitor_id(&self) -> String {
        if let Some(existing) = self.store.get(VISITOR_ID_KEY).filter(|v| !v.is_empty()) {
            return existing;
        }
        let fresh = uuid::Uuid::new_v4().to_string();
        if let Err(err) = self.store.set(VISITOR_ID_KEY, &fresh) {
            tracing::warn!(error = %err, "failed to persist visitor id");
        }
        fresh
    }

    /// Return a valid session token, reissuing it if necessary.
    ///
    /// Returns `None` when no valid token is cached and issuance fails.
    pub async fn get_token(&self) -> Option<String> {
        self.get_token_at(chrono::Utc::now().timestamp()).await
    }

    /// [`get_token`](Self::get_token) with an explicit clock, in Unix seconds.
    pub async fn get_token_at(&self, now: i64) -> Option<String> {
        let visitor_id = self.visitor_id();

        if let Some(cached) = self.store.get(SESSION_TOKEN_KEY) {
            if !is_token_expired(&cached, now) {
                tracing::debug!("using cached session token");
                return Some(cached);
            }
            tracing::debug!("cached session token expired or malformed");
        }

        match self.issue(&visitor_id).await {
            Ok(token) => {
                if let Err(err) = self.store.set(SESSION_TOKEN_KEY, &token) {
                    tracing::warn!(error = %err, "failed to persist session token");
                }
                Some(token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "session token issuance failed");
                None
            }
        }
    }

    async fn issue(&self, visitor_id: &str) -> Result<String, WidgetError> {
        let body = TokenRequest {
            visitor_id,
            user_agent: &self.user_agent,
            site_name: &self.site_name,
        };
        let request = self.client.post(&self.endpoint).json(&body);

        let value = http::send_json(request, "visitor-token")
            .await?
            .ok_or_else(|| WidgetError::Http("visitor-token returned non-success status".into()))?;

        let response: TokenResponse = serde_json::from_value(value)
            .map_err(|e| WidgetError::Parse(format!("visitor-token response: {e}")))?;
        if response.token.is_empty() {
            return Err(WidgetError::Parse("visitor-token response has empty token".into()));
        }
        Ok(response.token)
    }
}
