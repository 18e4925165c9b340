//! Both credential contexts of the Spotify accounts service.
//!
//! - User context: authorization code flow with PKCE. The user approves the
//!   scopes in the browser, the local callback server receives the code and
//!   [`exchange_code_pkce`] trades it for a refreshable token.
//! - Application context: client credentials grant, used for catalog reads.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config,
    errors::{ReleasifyError, Result},
    management::TokenManager,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the interactive PKCE flow and stores the resulting token.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri(),
        &code_challenge,
        &config::spotify_scope(),
    )?;

    // verifier must be in place before the browser can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let Some(token) = wait_for_token(shared_state).await else {
        return Err(ReleasifyError::Auth(
            "authentication failed or timed out".to_string(),
        ));
    };

    TokenManager::new(token).persist().await
}

/// Builds the authorize URL the user opens in the browser.
///
/// Every parameter is form-encoded, so redirect URIs and space separated
/// scopes can be passed as they are configured.
///
/// # Arguments
///
/// * `auth_url` - Authorize endpoint of the accounts service
/// * `client_id` - Client id of the registered application
/// * `redirect_uri` - Callback served by the local server
/// * `code_challenge` - S256 challenge derived from the PKCE verifier
/// * `scope` - Space separated scopes to request
///
/// # Returns
///
/// - `Ok(Url)` - The URL with all query parameters attached
/// - `Err(ReleasifyError::Config)` - `auth_url` is not a valid URL
pub fn authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Result<Url> {
    Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )
    .map_err(|e| ReleasifyError::Config {
        key: format!("SPOTIFY_API_AUTH_URL ({auth_url}: {e})"),
    })
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

async fn post_token_form(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<TokenResponse> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ReleasifyError::Auth(format!(
            "{context} rejected with {status}: {}",
            String::from_utf8_lossy(&body)
        )));
    }

    serde_json::from_slice(&body).map_err(|e| ReleasifyError::malformed(context, e))
}

/// Trades the authorization code for a user token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let request = Client::new().post(config::spotify_apitoken_url()).form(&[
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri.as_str()),
    ]);

    let resp = post_token_form(request, "code exchange").await?;
    let Some(refresh_token) = resp.refresh_token else {
        return Err(ReleasifyError::Auth(
            "code exchange returned no refresh token".to_string(),
        ));
    };

    Ok(Token {
        access_token: resp.access_token,
        refresh_token,
        scope: resp.scope.unwrap_or_default(),
        expires_in: resp.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Refreshes a user token. The refresh token and scope of `previous` are
/// kept when the response does not rotate them.
pub async fn refresh_token(token_url: &str, client_id: &str, previous: &Token) -> Result<Token> {
    debug!("refreshing user token");
    let request = Client::new().post(token_url).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", previous.refresh_token.as_str()),
        ("client_id", client_id),
    ]);

    let resp = post_token_form(request, "token refresh").await?;
    Ok(Token {
        access_token: resp.access_token,
        refresh_token: resp
            .refresh_token
            .unwrap_or_else(|| previous.refresh_token.clone()),
        scope: resp.scope.unwrap_or_else(|| previous.scope.clone()),
        expires_in: resp.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Requests an application token with the client credentials grant.
pub async fn request_client_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<TokenResponse> {
    debug!("requesting application token");
    let request = Client::new()
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")]);

    post_token_form(request, "client credentials").await
}
