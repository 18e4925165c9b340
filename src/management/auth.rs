use std::{io::ErrorKind, path::PathBuf};

use chrono::Utc;

use crate::{
    config,
    errors::{ReleasifyError, Result},
    spotify,
    types::Token,
};

/// Tokens are renewed this many seconds before they actually expire.
const EXPIRY_MARGIN_SECS: u64 = 240;

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// User token, persisted between runs so `releasify auth` is a one-off.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
    token_url: String,
    client_id: Option<String>,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
            token_url: config::spotify_apitoken_url(),
            client_id: None,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Overrides the refresh endpoint and client id taken from configuration.
    pub fn with_refresh_endpoint(mut self, token_url: String, client_id: String) -> Self {
        self.token_url = token_url;
        self.client_id = Some(client_id);
        self
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReleasifyError::Auth(
                    "no stored token, run `releasify auth` first".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self::new(token).with_path(path))
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired() {
            let client_id = match &self.client_id {
                Some(id) => id.clone(),
                None => config::spotify_client_id()?,
            };
            self.token = spotify::auth::refresh_token(&self.token_url, &client_id, &self.token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        now_secs() + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

/// Application token from the client credentials grant. Lives in memory
/// only and is requested again once expired.
pub struct AppTokenManager {
    client_id: String,
    client_secret: String,
    token_url: String,
    token: Option<(String, u64)>,
}

impl AppTokenManager {
    pub fn new(client_id: String, client_secret: String, token_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            token_url,
            token: None,
        }
    }

    pub fn from_config() -> Result<Self> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
            config::spotify_apitoken_url(),
        ))
    }

    pub async fn get_valid_token(&mut self) -> Result<String> {
        if let Some((access_token, expires_at)) = &self.token {
            if now_secs() + EXPIRY_MARGIN_SECS < *expires_at {
                return Ok(access_token.clone());
            }
        }

        let resp =
            spotify::auth::request_client_token(&self.token_url, &self.client_id, &self.client_secret)
                .await?;
        let expires_at = now_secs() + resp.expires_in;
        self.token = Some((resp.access_token.clone(), expires_at));
        Ok(resp.access_token)
    }
}
