//! Library access on behalf of the authorized user.
//!
//! Reads source playlists and creates and fills destination playlists. All
//! calls need the user token with the playlist scopes requested by
//! `releasify auth`.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    engine::{Library, WRITE_BATCH_SIZE},
    errors::Result,
    spotify::SpotifyApi,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        CurrentUser, NewPlaylist, Page, PlaylistId, PlaylistItem, PlaylistName, TrackId, UserId,
    },
};

const PLAYLIST_DESCRIPTION: &str = "Fresh releases from the artists of your playlists.";

/// Only the fields the engine reads; keeps playlist pages small.
const PLAYLIST_TRACK_FIELDS: &str = "total,items(track(id,artists(id)))";

#[async_trait]
impl Library for SpotifyApi {
    /// Returns the id of the user the token belongs to (`GET /me`).
    ///
    /// Destination playlists are created under this account.
    async fn current_user_id(&self) -> Result<UserId> {
        let user: CurrentUser = self.get_json("/me", &[], "GET /me").await?;
        Ok(user.id)
    }

    /// Retrieves one page of a playlist's tracks.
    ///
    /// Calls `GET /playlists/{id}/tracks` restricted to track and artist ids.
    /// Removed tracks come back with a null `track`, local files with null
    /// ids; both are kept in the page and skipped by the engine.
    ///
    /// # Arguments
    ///
    /// * `playlist` - Source playlist
    /// * `limit` - Page size, at most 100
    /// * `offset` - Index of the first entry of the page
    ///
    /// # Returns
    ///
    /// - `Ok(Page<PlaylistItem>)` - Entries plus the playlist's total length
    /// - `Err(ReleasifyError::Api)` - e.g. `404` for an unknown or private
    ///   playlist
    /// - `Err(ReleasifyError::MalformedResponse)` - Body does not match the
    ///   track listing
    ///
    /// # Example
    ///
    /// ```
    /// let page = api.playlist_tracks(&PlaylistId::from("37i9dQZF1DX0XUsuxWHRQd"), 100, 0).await?;
    /// let tracks = page.items.iter().filter_map(|item| item.track.as_ref());
    /// ```
    async fn playlist_tracks(
        &self,
        playlist: &PlaylistId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.get_json(
            &format!("/playlists/{playlist}/tracks"),
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("fields", PLAYLIST_TRACK_FIELDS.to_string()),
            ],
            "GET /playlists/{id}/tracks",
        )
        .await
    }

    /// Returns the current name of a playlist (`GET /playlists/{id}`).
    async fn playlist_name(&self, playlist: &PlaylistId) -> Result<String> {
        let resp: PlaylistName = self
            .get_json(
                &format!("/playlists/{playlist}"),
                &[("fields", "name".to_string())],
                "GET /playlists/{id}",
            )
            .await?;
        Ok(resp.name)
    }

    /// Creates an empty private playlist for `user`.
    ///
    /// Calls `POST /users/{id}/playlists`. The playlist gets a fixed
    /// description and is not public.
    ///
    /// # Arguments
    ///
    /// * `user` - Owner of the new playlist, see [`Library::current_user_id`]
    /// * `name` - Full playlist title, e.g. `Releasify: Morning`
    ///
    /// # Returns
    ///
    /// - `Ok(NewPlaylist)` - Id of the new playlist and its web URL if the
    ///   service returned one
    /// - `Err(ReleasifyError)` - The playlist could not be created
    async fn create_playlist(&self, user: &UserId, name: &str) -> Result<NewPlaylist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public: false,
        };
        let resp: CreatePlaylistResponse = self
            .post_json(
                &format!("/users/{user}/playlists"),
                &body,
                "POST /users/{id}/playlists",
            )
            .await?;
        Ok(resp.into())
    }

    /// Appends tracks to a playlist (`POST /playlists/{id}/tracks`).
    ///
    /// Track ids are sent as `spotify:track:<id>` URIs. The endpoint takes at
    /// most [`WRITE_BATCH_SIZE`] URIs per call; batching is up to the caller.
    ///
    /// # Arguments
    ///
    /// * `user` - Owner of the playlist, only used for logging
    /// * `playlist` - Destination playlist
    /// * `tracks` - Up to [`WRITE_BATCH_SIZE`] track ids, in the order they
    ///   should appear
    async fn add_tracks(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        tracks: &[TrackId],
    ) -> Result<()> {
        debug_assert!(tracks.len() <= WRITE_BATCH_SIZE);
        let body = AddTracksRequest {
            uris: tracks.iter().map(|t| t.uri()).collect(),
        };
        let resp: AddTracksResponse = self
            .post_json(
                &format!("/playlists/{playlist}/tracks"),
                &body,
                "POST /playlists/{id}/tracks",
            )
            .await?;
        debug!(%user, %playlist, snapshot = %resp.snapshot_id, "tracks added");
        Ok(())
    }
}
