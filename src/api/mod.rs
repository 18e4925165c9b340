//! HTTP endpoints of the local server started by `releasify auth`.
//!
//! - [`callback`] finishes the PKCE flow once the browser is redirected
//!   back with an authorization code.
//! - [`health`] answers with the crate name and version.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
