#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use releasify::{
    engine::{Catalog, Library},
    errors::{ReleasifyError, Result},
    types::{
        AlbumGroups, AlbumId, ArtistId, NewPlaylist, Page, PlaylistId, PlaylistItem,
        PlaylistTrack, ReleaseDatePrecision, SimplifiedAlbum, SimplifiedArtist, SimplifiedTrack,
        TrackId, UserId,
    },
};
use reqwest::StatusCode;

pub const USER: &str = "listener";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> String {
    (now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

pub fn ids<T: for<'a> From<&'a str>>(raw: &[&str]) -> Vec<T> {
    raw.iter().map(|s| T::from(*s)).collect()
}

fn page<T: Clone>(items: &[T], limit: u32, offset: u32) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + limit as usize).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        total: items.len() as u32,
    }
}

fn remote_failure(what: &str) -> ReleasifyError {
    ReleasifyError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("{what} failed"),
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub playlist_pages: Vec<(PlaylistId, u32, u32)>,
    pub album_pages: Vec<(ArtistId, String, u32, u32)>,
    pub track_pages: Vec<(AlbumId, u32, u32)>,
    pub created: Vec<(PlaylistId, String)>,
    pub writes: Vec<(PlaylistId, Vec<TrackId>)>,
}

/// In-memory stand-in for both the catalog and the library.
#[derive(Default)]
pub struct FakeSpotify {
    playlists: HashMap<PlaylistId, (String, Vec<PlaylistItem>)>,
    albums: HashMap<ArtistId, Vec<SimplifiedAlbum>>,
    tracks: HashMap<AlbumId, Vec<SimplifiedTrack>>,
    failing_playlists: HashSet<PlaylistId>,
    failing_create: bool,
    failing_albums: Mutex<HashSet<AlbumId>>,
    pub calls: Mutex<Calls>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tracks` is a list of `(track id, artist ids)`.
    pub fn playlist(mut self, id: &str, name: &str, tracks: &[(&str, &[&str])]) -> Self {
        let items = tracks
            .iter()
            .map(|(track, artists)| PlaylistItem {
                track: Some(PlaylistTrack {
                    id: Some(TrackId::from(*track)),
                    artists: artists
                        .iter()
                        .map(|a| SimplifiedArtist {
                            id: Some(ArtistId::from(*a)),
                        })
                        .collect(),
                }),
            })
            .collect();
        self.playlists
            .insert(PlaylistId::from(id), (name.to_string(), items));
        self
    }

    pub fn raw_playlist(mut self, id: &str, name: &str, items: Vec<PlaylistItem>) -> Self {
        self.playlists
            .insert(PlaylistId::from(id), (name.to_string(), items));
        self
    }

    pub fn album(
        mut self,
        artist: &str,
        album: &str,
        release_date: &str,
        precision: ReleaseDatePrecision,
        tracks: &[&str],
    ) -> Self {
        self.albums
            .entry(ArtistId::from(artist))
            .or_default()
            .push(SimplifiedAlbum {
                id: AlbumId::from(album),
                name: album.to_string(),
                release_date: release_date.to_string(),
                release_date_precision: precision,
                album_type: "album".to_string(),
            });
        self.tracks.insert(
            AlbumId::from(album),
            tracks
                .iter()
                .map(|t| SimplifiedTrack {
                    id: TrackId::from(*t),
                })
                .collect(),
        );
        self
    }

    pub fn recent_album(self, artist: &str, album: &str, tracks: &[&str]) -> Self {
        let released = days_ago(2);
        self.album(artist, album, &released, ReleaseDatePrecision::Day, tracks)
    }

    pub fn failing_playlist(mut self, id: &str) -> Self {
        self.failing_playlists.insert(PlaylistId::from(id));
        self
    }

    /// The next track listing of `album` fails; later listings succeed.
    pub fn failing_album(self, album: &str) -> Self {
        self.failing_albums
            .lock()
            .unwrap()
            .insert(AlbumId::from(album));
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.failing_create = true;
        self
    }

    pub fn writes(&self) -> Vec<(PlaylistId, Vec<TrackId>)> {
        self.calls.lock().unwrap().writes.clone()
    }

    /// Every track written to `playlist`, in write order.
    pub fn written_to(&self, playlist: &str) -> Vec<TrackId> {
        let playlist = PlaylistId::from(playlist);
        self.writes()
            .into_iter()
            .filter(|(p, _)| *p == playlist)
            .flat_map(|(_, tracks)| tracks)
            .collect()
    }

    pub fn created(&self) -> Vec<(PlaylistId, String)> {
        self.calls.lock().unwrap().created.clone()
    }

    pub fn track_pages_for(&self, album: &str) -> usize {
        let album = AlbumId::from(album);
        self.calls
            .lock()
            .unwrap()
            .track_pages
            .iter()
            .filter(|(a, _, _)| *a == album)
            .count()
    }

    pub fn album_lookups_for(&self, artist: &str) -> usize {
        let artist = ArtistId::from(artist);
        self.calls
            .lock()
            .unwrap()
            .album_pages
            .iter()
            .filter(|(a, _, _, _)| *a == artist)
            .count()
    }
}

#[async_trait]
impl Catalog for FakeSpotify {
    async fn artist_albums(
        &self,
        artist: &ArtistId,
        groups: &AlbumGroups,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedAlbum>> {
        self.calls.lock().unwrap().album_pages.push((
            artist.clone(),
            groups.to_string(),
            limit,
            offset,
        ));
        let albums = self.albums.get(artist).cloned().unwrap_or_default();
        Ok(page(&albums, limit, offset))
    }

    async fn album_tracks(
        &self,
        album: &AlbumId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedTrack>> {
        self.calls
            .lock()
            .unwrap()
            .track_pages
            .push((album.clone(), limit, offset));
        if self.failing_albums.lock().unwrap().remove(album) {
            return Err(remote_failure("album track listing"));
        }
        let tracks = self.tracks.get(album).cloned().unwrap_or_default();
        Ok(page(&tracks, limit, offset))
    }
}

#[async_trait]
impl Library for FakeSpotify {
    async fn current_user_id(&self) -> Result<UserId> {
        Ok(UserId::from(USER))
    }

    async fn playlist_tracks(
        &self,
        playlist: &PlaylistId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.calls
            .lock()
            .unwrap()
            .playlist_pages
            .push((playlist.clone(), limit, offset));
        if self.failing_playlists.contains(playlist) {
            return Err(remote_failure("playlist listing"));
        }
        let items = self
            .playlists
            .get(playlist)
            .map(|(_, items)| items.clone())
            .unwrap_or_default();
        Ok(page(&items, limit, offset))
    }

    async fn playlist_name(&self, playlist: &PlaylistId) -> Result<String> {
        self.playlists
            .get(playlist)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| remote_failure("playlist name"))
    }

    async fn create_playlist(&self, user: &UserId, name: &str) -> Result<NewPlaylist> {
        assert_eq!(user.as_str(), USER);
        if self.failing_create {
            return Err(remote_failure("playlist creation"));
        }
        let mut calls = self.calls.lock().unwrap();
        let id = PlaylistId::new(format!("dest-{}", calls.created.len() + 1));
        calls.created.push((id.clone(), name.to_string()));
        Ok(NewPlaylist {
            url: Some(format!("https://open.spotify.com/playlist/{id}")),
            id,
        })
    }

    async fn add_tracks(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        tracks: &[TrackId],
    ) -> Result<()> {
        assert_eq!(user.as_str(), USER);
        self.calls
            .lock()
            .unwrap()
            .writes
            .push((playlist.clone(), tracks.to_vec()));
        Ok(())
    }
}
