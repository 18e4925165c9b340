//! # Spotify Integration Module
//!
//! HTTP client for the Spotify Web API. [`SpotifyApi`] implements both
//! engine ports:
//!
//! ```text
//! Aggregator
//!     ├── Library  ── SpotifyApi (user token)  ── /me, /playlists, /users/{id}/playlists
//!     └── Catalog  ── SpotifyApi (app token)   ── /artists/{id}/albums, /albums/{id}/tracks
//! ```
//!
//! Which credentials a client sends is decided by its [`Credentials`]; the
//! CLI builds one client per credential context.
//!
//! ## Retries
//!
//! Transient failures are handled here and not in the engine:
//! - `502 Bad Gateway` is retried after a fixed delay.
//! - `429 Too Many Requests` waits for `Retry-After` when it is at most two
//!   minutes, otherwise the call fails.
//!
//! Each call is attempted at most [`MAX_ATTEMPTS`] times. Any other
//! non-success status becomes [`ReleasifyError::Api`].
//!
//! ## Responses
//!
//! Bodies are decoded into the structs in [`crate::types`]. A body that does
//! not fit its struct is reported as [`ReleasifyError::MalformedResponse`]
//! naming the endpoint.

pub mod auth;
mod catalog;
mod library;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{sync::Mutex, time::sleep};
use tracing::{debug, trace};

use crate::{
    config,
    errors::{ReleasifyError, Result},
    management::{AppTokenManager, TokenManager},
    warning,
};

pub const MAX_ATTEMPTS: u32 = 5;
pub const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

pub enum Credentials {
    User(Mutex<TokenManager>),
    App(Mutex<AppTokenManager>),
    /// Fixed bearer token, never refreshed.
    Static(String),
}

pub struct SpotifyApi {
    http: Client,
    base_url: String,
    credentials: Credentials,
    retry_delay: Duration,
}

impl SpotifyApi {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            retry_delay: BAD_GATEWAY_DELAY,
        }
    }

    /// Client acting on behalf of the authorized user.
    pub fn for_user(token_mgr: TokenManager) -> Self {
        Self::new(
            config::spotify_apiurl(),
            Credentials::User(Mutex::new(token_mgr)),
        )
    }

    /// Client acting as the application itself.
    pub fn for_app(token_mgr: AppTokenManager) -> Self {
        Self::new(
            config::spotify_apiurl(),
            Credentials::App(Mutex::new(token_mgr)),
        )
    }

    /// Delay before retrying a `502 Bad Gateway`.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    async fn bearer(&self) -> Result<String> {
        match &self.credentials {
            Credentials::User(mgr) => mgr.lock().await.get_valid_token().await,
            Credentials::App(mgr) => mgr.lock().await.get_valid_token().await,
            Credentials::Static(token) => Ok(token.clone()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, build: impl Fn(&Client) -> RequestBuilder) -> Result<Response> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let token = self.bearer().await?;
            let response = build(&self.http).bearer_auth(token).send().await?;
            let status = response.status();
            trace!(%status, attempt, url = %response.url(), "response");

            if status.is_success() {
                return Ok(response);
            }

            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::BAD_GATEWAY {
                    sleep(self.retry_delay).await;
                    continue;
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(0);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        debug!(retry_after, "rate limited");
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                }
            }

            let message = response.text().await.unwrap_or_default();
            return Err(ReleasifyError::Api { status, message });
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ReleasifyError::malformed(context, e))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let response = self
            .send(|http| http.get(&url).query(query))
            .await?;
        Self::decode(response, context).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .send(|http| http.request(Method::POST, &url).json(body))
            .await?;
        Self::decode(response, context).await
    }
}
