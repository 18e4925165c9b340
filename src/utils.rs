use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{AlbumGroup, AlbumGroups, PlaylistId};

const PLAYLIST_URI_PREFIX: &str = "spotify:playlist:";
const PLAYLIST_URL_MARKER: &str = "open.spotify.com/playlist/";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Reduces a playlist reference to its bare id.
///
/// Accepts a bare id, a `spotify:playlist:` URI or an
/// `https://open.spotify.com/playlist/<id>?si=...` share link.
pub fn clean_playlist_id(input: &str) -> PlaylistId {
    let input = input.trim();

    if let Some(id) = input.strip_prefix(PLAYLIST_URI_PREFIX) {
        return PlaylistId::from(id);
    }

    if let Some(pos) = input.find(PLAYLIST_URL_MARKER) {
        let rest = &input[pos + PLAYLIST_URL_MARKER.len()..];
        let id = rest.split(['?', '/', '#']).next().unwrap_or(rest);
        return PlaylistId::from(id);
    }

    PlaylistId::from(input)
}

/// Cleans every reference and drops repeats, keeping the first occurrence.
pub fn clean_playlist_ids(inputs: &[String]) -> Vec<PlaylistId> {
    let mut seen = HashSet::new();
    inputs
        .iter()
        .map(|input| clean_playlist_id(input))
        .filter(|id| !id.as_str().is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Parses a comma separated album group list such as `album,single`.
pub fn parse_album_groups(s: &str) -> Result<AlbumGroups, String> {
    let groups = s
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<AlbumGroup>())
        .collect::<Result<Vec<_>, _>>()?;

    if groups.is_empty() {
        return Err("at least one album group is required".to_string());
    }

    Ok(AlbumGroups::new(groups))
}
