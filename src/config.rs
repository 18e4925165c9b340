//! Configuration management for Releasify.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Real environment variables always win
//! over the file.
//!
//! The lookup order is:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Spotify defaults (for endpoints and the callback server only)

use std::{env, path::PathBuf};

use crate::errors::{ReleasifyError, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "playlist-read-private playlist-modify-private playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Directory holding the `.env` file and the token cache.
///
/// - Linux: `~/.local/share/releasify`
/// - macOS: `~/Library/Application Support/releasify`
/// - Windows: `%LOCALAPPDATA%/releasify`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("releasify");
    path
}

/// Loads the `.env` file from the data directory if it exists.
///
/// A missing file is not an error; the variables may already be exported in
/// the environment. The directory is created so users know where to put it.
/// Variables already set in the environment are not overwritten.
///
/// # Errors
///
/// - `ReleasifyError::Io` - The data directory cannot be created
/// - `ReleasifyError::Config` - The `.env` file exists but cannot be parsed
///
/// # Example
///
/// ```
/// use releasify::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ReleasifyError::Config {
            key: format!("{} ({})", path.display(), e),
        })?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| ReleasifyError::Config {
        key: key.to_string(),
    })
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Address the local OAuth callback server binds to.
///
/// Read from `SERVER_ADDRESS`. Must agree with the host and port of
/// [`spotify_redirect_uri`].
///
/// # Example
///
/// ```
/// let addr = server_addr(); // "127.0.0.1:8888" unless overridden
/// ```
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client id registered with the Spotify developer dashboard.
///
/// Read from `SPOTIFY_API_AUTH_CLIENT_ID`. Used by both credential contexts.
///
/// # Errors
///
/// Returns `ReleasifyError::Config` naming the key when it is not set.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret, needed only for the application (catalog) credentials.
///
/// Read from `SPOTIFY_API_AUTH_CLIENT_SECRET`.
///
/// # Errors
///
/// Returns `ReleasifyError::Config` naming the key when it is not set.
///
/// # Security Note
///
/// Keep it out of logs and version control.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Redirect URI; must match the one registered for the application.
///
/// Read from `SPOTIFY_API_REDIRECT_URI`, defaults to
/// [`DEFAULT_REDIRECT_URI`].
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Space separated scopes requested during `releasify auth`.
///
/// The default covers reading source playlists and writing private and
/// public destination playlists.
pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Authorize endpoint of the accounts service (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Base URL of the Web API (`SPOTIFY_API_URL`), without trailing slash.
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Token endpoint (`SPOTIFY_API_TOKEN_URL`), used for the code exchange,
/// refreshes and the client credentials grant.
pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
