use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    api, config,
    errors::{ReleasifyError, Result},
    types::PkceToken,
};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the OAuth callback until the process ends.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let server_addr = config::server_addr();
    let addr = SocketAddr::from_str(&server_addr).map_err(|e| ReleasifyError::Config {
        key: format!("SERVER_ADDRESS ({server_addr}: {e})"),
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    debug!(%addr, "callback server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
