//! # Aggregation Engine
//!
//! Fan-out from source playlists to fresh tracks:
//!
//! ```text
//! playlist ──> artists ──> albums (release window) ──> tracks ──> destination
//!   (Library)   (dedup)      (Catalog)                 (Catalog)   (Library, batched)
//! ```
//!
//! The engine only talks to the remote service through the [`Catalog`] and
//! [`Library`] ports, so it can run against the Spotify client or against
//! in-memory fakes.
//!
//! ## Deduplication
//!
//! - Artists are collected into a set per playlist, and an artist is
//!   expanded at most once per destination.
//! - Albums are expanded at most once per destination.
//! - [`SeenTracks`] keeps, per destination playlist, every track id written
//!   during the run. A destination never receives the same track twice.
//!
//! ## Destinations
//!
//! [`DestinationPolicy`] turns the source list into one or more
//! [`DestinationPlan`]s. Each plan gets a freshly created playlist.

mod aggregator;
mod pager;
mod policy;
mod ports;
mod report;
mod seen;

pub use aggregator::Aggregator;
pub use pager::Pager;
pub use policy::{
    COMBINED_LABEL, DestinationName, DestinationPlan, DestinationPolicy, TITLE_PREFIX,
    destination_title,
};
pub use ports::{
    ALBUM_PAGE_SIZE, ALBUM_TRACKS_PAGE_SIZE, Catalog, Library, PLAYLIST_PAGE_SIZE,
    WRITE_BATCH_SIZE,
};
pub use report::{DestinationReport, RunReport, SourceFailure};
pub use seen::SeenTracks;
