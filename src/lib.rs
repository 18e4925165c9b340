//! Releasify
//!
//! Finds what the artists on your Spotify playlists released recently and
//! collects those tracks into new playlists.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line command implementations
//! - `config` - Configuration from environment variables and `.env`
//! - `engine` - Aggregation engine (playlist -> artists -> albums -> tracks)
//! - `errors` - Error type shared by all modules
//! - `logger` - Diagnostic logging setup
//! - `management` - Token lifecycle for both credential contexts
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client
//! - `types` - Ids, response structures and report rows
//! - `utils` - PKCE helpers and input cleaning
//! - `window` - Release window filter

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod window;

pub use errors::{ReleasifyError, Result};

#[doc(hidden)]
pub use colored as __colored;

/// Progress line on stdout, prefixed with a blue `o`.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use $crate::__colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Completion line on stdout, prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use $crate::__colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Recoverable problem on stderr, prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use $crate::__colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Fatal problem on stderr, prefixed with a red `!`. Exits with status 1,
/// so only the CLI layer may use it.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use $crate::__colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
