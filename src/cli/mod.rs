//! # CLI Module
//!
//! Command bodies behind the `releasify` binary. Each command prints its
//! progress with the crate's output macros and exits non-zero on failure.
//!
//! - [`auth`] - authorize the user once (PKCE); the token is cached and
//!   refreshed automatically afterwards
//! - [`run`] - scan source playlists and fill new destination playlists
//!
//! ```bash
//! releasify auth
//! releasify run spotify:playlist:37i9dQZF1DX0XUsuxWHRQd
//! releasify run <id1> <id2> --time_window 14 --name "Weekend"
//! releasify run <id1> <id2> --separate
//! ```

mod auth;
mod run;

pub use auth::auth;
pub use run::run;
