use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

macro_rules! spotify_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

spotify_id!(
    /// Account owning the destination playlists.
    UserId
);
spotify_id!(PlaylistId);
spotify_id!(ArtistId);
spotify_id!(AlbumId);
spotify_id!(
    /// Bare track id. Written to playlists as a `spotify:track:` URI.
    TrackId
);

impl TrackId {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Raw token endpoint answer. Refresh responses may omit the refresh token
/// and the scope.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
}

/// One page of an offset-paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistName {
    pub name: String,
}

/// Entry of a playlist's track listing. `track` is null for removed
/// tracks; ids are null for local files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<TrackId>,
    // podcast episodes carry a show instead of artists
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<ArtistId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDatePrecision {
    Day,
    Month,
    Year,
}

impl fmt::Display for ReleaseDatePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseDatePrecision::Day => "day",
            ReleaseDatePrecision::Month => "month",
            ReleaseDatePrecision::Year => "year",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: AlbumId,
    #[serde(default)]
    pub name: String,
    pub release_date: String,
    pub release_date_precision: ReleaseDatePrecision,
    #[serde(default)]
    pub album_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: TrackId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// A destination playlist created during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub id: PlaylistId,
    pub url: Option<String>,
}

impl From<CreatePlaylistResponse> for NewPlaylist {
    fn from(resp: CreatePlaylistResponse) -> Self {
        NewPlaylist {
            id: resp.id,
            url: resp.external_urls.spotify,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct ReportTableRow {
    pub playlist: String,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
    pub failed: String,
}

/// Release group accepted by the artist album listing (`include_groups`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumGroup {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl AlbumGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumGroup::Album => "album",
            AlbumGroup::Single => "single",
            AlbumGroup::AppearsOn => "appears_on",
            AlbumGroup::Compilation => "compilation",
        }
    }
}

impl std::str::FromStr for AlbumGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "album" => Ok(AlbumGroup::Album),
            "single" => Ok(AlbumGroup::Single),
            "appears_on" => Ok(AlbumGroup::AppearsOn),
            "compilation" => Ok(AlbumGroup::Compilation),
            other => Err(format!(
                "unknown album group '{other}' (expected album, single, appears_on or compilation)"
            )),
        }
    }
}

/// Album type policy for the artist album listing. Defaults to albums and
/// singles, leaving out compilations and appearances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumGroups(Vec<AlbumGroup>);

impl AlbumGroups {
    pub fn new(groups: Vec<AlbumGroup>) -> Self {
        let mut unique: Vec<AlbumGroup> = Vec::with_capacity(groups.len());
        for group in groups {
            if !unique.contains(&group) {
                unique.push(group);
            }
        }
        Self(unique)
    }

    pub fn groups(&self) -> &[AlbumGroup] {
        &self.0
    }
}

impl Default for AlbumGroups {
    fn default() -> Self {
        Self(vec![AlbumGroup::Album, AlbumGroup::Single])
    }
}

impl fmt::Display for AlbumGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
