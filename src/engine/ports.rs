use async_trait::async_trait;

use crate::{
    errors::Result,
    types::{
        AlbumGroups, AlbumId, ArtistId, NewPlaylist, Page, PlaylistId, PlaylistItem,
        SimplifiedAlbum, SimplifiedTrack, TrackId, UserId,
    },
};

pub const PLAYLIST_PAGE_SIZE: u32 = 100;
pub const ALBUM_PAGE_SIZE: u32 = 50;
pub const ALBUM_TRACKS_PAGE_SIZE: u32 = 50;

/// Most track ids a single playlist write may carry.
pub const WRITE_BATCH_SIZE: usize = 100;

/// Read-only artist/album/track metadata. Served with application
/// credentials.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn artist_albums(
        &self,
        artist: &ArtistId,
        groups: &AlbumGroups,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedAlbum>>;

    async fn album_tracks(
        &self,
        album: &AlbumId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedTrack>>;
}

/// The user's playlists. Served with user credentials.
#[async_trait]
pub trait Library: Send + Sync {
    async fn current_user_id(&self) -> Result<UserId>;

    async fn playlist_tracks(
        &self,
        playlist: &PlaylistId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>>;

    async fn playlist_name(&self, playlist: &PlaylistId) -> Result<String>;

    async fn create_playlist(&self, user: &UserId, name: &str) -> Result<NewPlaylist>;

    /// `tracks` never holds more than [`WRITE_BATCH_SIZE`] ids.
    async fn add_tracks(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        tracks: &[TrackId],
    ) -> Result<()>;
}
