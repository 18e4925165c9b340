use std::collections::{HashMap, HashSet};

use crate::types::{PlaylistId, TrackId};

/// Tracks already written to each destination playlist during a run.
#[derive(Debug, Default)]
pub struct SeenTracks {
    by_playlist: HashMap<PlaylistId, HashSet<TrackId>>,
}

impl SeenTracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks from `tracks` that `playlist` has not received yet, in input
    /// order and without repeats.
    pub fn unseen(&self, playlist: &PlaylistId, tracks: &[TrackId]) -> Vec<TrackId> {
        let known = self.by_playlist.get(playlist);
        let mut batch: HashSet<&TrackId> = HashSet::new();
        tracks
            .iter()
            .filter(|t| known.is_none_or(|k| !k.contains(*t)))
            .filter(|t| batch.insert(*t))
            .cloned()
            .collect()
    }

    pub fn record(&mut self, playlist: &PlaylistId, tracks: &[TrackId]) {
        self.by_playlist
            .entry(playlist.clone())
            .or_default()
            .extend(tracks.iter().cloned());
    }

    pub fn contains(&self, playlist: &PlaylistId, track: &TrackId) -> bool {
        self.by_playlist
            .get(playlist)
            .is_some_and(|k| k.contains(track))
    }

    pub fn count(&self, playlist: &PlaylistId) -> usize {
        self.by_playlist.get(playlist).map_or(0, |k| k.len())
    }
}
