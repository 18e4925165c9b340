//! Catalog reads: artist discographies and album track listings.
//!
//! Both endpoints are public metadata and are called with the application
//! token, so they work without any user scope.

use async_trait::async_trait;

use crate::{
    engine::Catalog,
    errors::Result,
    spotify::SpotifyApi,
    types::{AlbumGroups, AlbumId, ArtistId, Page, SimplifiedAlbum, SimplifiedTrack},
};

#[async_trait]
impl Catalog for SpotifyApi {
    /// Retrieves one page of an artist's albums.
    ///
    /// Calls `GET /artists/{id}/albums`. Only albums in one of `groups` are
    /// listed; the groups are sent comma separated in `include_groups`.
    ///
    /// # Arguments
    ///
    /// * `artist` - Artist whose discography is listed
    /// * `groups` - Release groups to include (e.g. `album,single`)
    /// * `limit` - Page size, at most 50
    /// * `offset` - Index of the first album of the page
    ///
    /// # Returns
    ///
    /// - `Ok(Page<SimplifiedAlbum>)` - Albums with release date and precision,
    ///   plus the total number of albums in the listing
    /// - `Err(ReleasifyError::Api)` - Non-success status after retries
    /// - `Err(ReleasifyError::MalformedResponse)` - Body does not match the
    ///   album listing
    ///
    /// # Example
    ///
    /// ```
    /// let page = api
    ///     .artist_albums(&ArtistId::from("0TnOYISbd1XYRBk9myaseg"), &AlbumGroups::default(), 50, 0)
    ///     .await?;
    /// println!("{} of {} albums", page.items.len(), page.total);
    /// ```
    async fn artist_albums(
        &self,
        artist: &ArtistId,
        groups: &AlbumGroups,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedAlbum>> {
        self.get_json(
            &format!("/artists/{artist}/albums"),
            &[
                ("include_groups", groups.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
            "GET /artists/{id}/albums",
        )
        .await
    }

    /// Retrieves one page of an album's tracks via `GET /albums/{id}/tracks`.
    ///
    /// # Arguments
    ///
    /// * `album` - Album to list
    /// * `limit` - Page size, at most 50
    /// * `offset` - Index of the first track of the page
    ///
    /// # Returns
    ///
    /// - `Ok(Page<SimplifiedTrack>)` - Track ids in album order
    /// - `Err(ReleasifyError)` - Transport, status or decoding failure
    async fn album_tracks(
        &self,
        album: &AlbumId,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedTrack>> {
        self.get_json(
            &format!("/albums/{album}/tracks"),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
            "GET /albums/{id}/tracks",
        )
        .await
    }
}
