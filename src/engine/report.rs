use std::sync::Arc;

use crate::{
    errors::ReleasifyError,
    types::{NewPlaylist, PlaylistId, ReportTableRow},
};

/// A source playlist whose processing was aborted. When the destination
/// itself could not be created, all of its sources share the same error.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub playlist_id: PlaylistId,
    pub error: Arc<ReleasifyError>,
}

/// Counts for one destination playlist. `playlist` is `None` when the
/// destination could not be created.
#[derive(Debug)]
pub struct DestinationReport {
    pub name: String,
    pub playlist: Option<NewPlaylist>,
    pub artists_scanned: usize,
    pub albums_matched: usize,
    pub tracks_added: usize,
    pub failures: Vec<SourceFailure>,
}

impl DestinationReport {
    pub fn new(name: String, playlist: Option<NewPlaylist>) -> Self {
        Self {
            name,
            playlist,
            artists_scanned: 0,
            albums_matched: 0,
            tracks_added: 0,
            failures: Vec::new(),
        }
    }

    pub fn to_row(&self) -> ReportTableRow {
        ReportTableRow {
            playlist: self.name.clone(),
            artists: self.artists_scanned,
            albums: self.albums_matched,
            tracks: self.tracks_added,
            failed: self
                .failures
                .iter()
                .map(|f| f.playlist_id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub destinations: Vec<DestinationReport>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.destinations.iter().any(|d| !d.failures.is_empty())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceFailure> {
        self.destinations.iter().flat_map(|d| d.failures.iter())
    }

    pub fn total_tracks_added(&self) -> usize {
        self.destinations.iter().map(|d| d.tracks_added).sum()
    }

    pub fn rows(&self) -> Vec<ReportTableRow> {
        self.destinations.iter().map(|d| d.to_row()).collect()
    }
}
