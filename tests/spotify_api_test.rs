use std::time::Duration;

use httpmock::prelude::*;
use releasify::{
    engine::{Catalog, Library},
    errors::ReleasifyError,
    spotify::{Credentials, MAX_ATTEMPTS, SpotifyApi},
    types::{AlbumGroup, AlbumGroups, AlbumId, ArtistId, PlaylistId, ReleaseDatePrecision, TrackId, UserId},
};
use serde_json::json;

fn client(server: &MockServer) -> SpotifyApi {
    SpotifyApi::new(server.base_url(), Credentials::Static("test-token".to_string()))
        .with_retry_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_current_user_sends_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/me")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(json!({ "id": "listener", "display_name": "Listener" }));
        })
        .await;

    let user = client(&server).current_user_id().await.unwrap();

    assert_eq!(user, UserId::from("listener"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_playlist_tracks_tolerates_missing_entries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/playlists/p1/tracks")
                .query_param("limit", "100")
                .query_param("offset", "0");
            then.status(200).json_body(json!({
                "total": 4,
                "items": [
                    { "track": { "id": "t1", "artists": [{ "id": "a1" }, { "id": "a2" }] } },
                    { "track": null },
                    { "track": { "id": null, "artists": [{ "id": null }] } },
                    { "track": { "id": "t2" } }
                ]
            }));
        })
        .await;

    let page = client(&server)
        .playlist_tracks(&PlaylistId::from("p1"), 100, 0)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.total, 4);
    assert_eq!(page.items.len(), 4);

    let first = page.items[0].track.as_ref().unwrap();
    assert_eq!(first.id, Some(TrackId::from("t1")));
    assert_eq!(first.artists[1].id, Some(ArtistId::from("a2")));
    assert!(page.items[1].track.is_none());
    assert!(page.items[2].track.as_ref().unwrap().id.is_none());
    assert!(page.items[3].track.as_ref().unwrap().artists.is_empty());
}

#[tokio::test]
async fn test_artist_albums_passes_include_groups() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/artists/a1/albums")
                .query_param("include_groups", "album,single,compilation")
                .query_param("limit", "50")
                .query_param("offset", "50");
            then.status(200).json_body(json!({
                "total": 51,
                "items": [{
                    "id": "al1",
                    "name": "Late Bloom",
                    "album_type": "single",
                    "release_date": "2024-06",
                    "release_date_precision": "month"
                }]
            }));
        })
        .await;

    let groups = AlbumGroups::new(vec![
        AlbumGroup::Album,
        AlbumGroup::Single,
        AlbumGroup::Compilation,
    ]);
    let page = client(&server)
        .artist_albums(&ArtistId::from("a1"), &groups, 50, 50)
        .await
        .unwrap();

    mock.assert_async().await;
    let album = &page.items[0];
    assert_eq!(album.id, AlbumId::from("al1"));
    assert_eq!(album.release_date, "2024-06");
    assert_eq!(album.release_date_precision, ReleaseDatePrecision::Month);
}

#[tokio::test]
async fn test_album_tracks() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/albums/al1/tracks")
                .query_param("limit", "50")
                .query_param("offset", "0");
            then.status(200).json_body(json!({
                "total": 2,
                "items": [{ "id": "t1", "name": "One" }, { "id": "t2", "name": "Two" }]
            }));
        })
        .await;

    let page = client(&server)
        .album_tracks(&AlbumId::from("al1"), 50, 0)
        .await
        .unwrap();

    let ids: Vec<TrackId> = page.items.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TrackId::from("t1"), TrackId::from("t2")]);
}

#[tokio::test]
async fn test_create_playlist_is_private() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/listener/playlists")
                .body_contains("\"name\":\"Releasify: Morning\"")
                .body_contains("\"public\":false");
            then.status(201).json_body(json!({
                "id": "new1",
                "name": "Releasify: Morning",
                "external_urls": { "spotify": "https://open.spotify.com/playlist/new1" }
            }));
        })
        .await;

    let playlist = client(&server)
        .create_playlist(&UserId::from("listener"), "Releasify: Morning")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(playlist.id, PlaylistId::from("new1"));
    assert_eq!(
        playlist.url.as_deref(),
        Some("https://open.spotify.com/playlist/new1")
    );
}

#[tokio::test]
async fn test_add_tracks_sends_track_uris() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/playlists/new1/tracks")
                .json_body(json!({ "uris": ["spotify:track:t1", "spotify:track:t2"] }));
            then.status(201).json_body(json!({ "snapshot_id": "snap" }));
        })
        .await;

    client(&server)
        .add_tracks(
            &UserId::from("listener"),
            &PlaylistId::from("new1"),
            &[TrackId::from("t1"), TrackId::from("t2")],
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unexpected_body_is_malformed_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/playlists/p1/tracks");
            then.status(200).json_body(json!({ "items": "nope" }));
        })
        .await;

    let err = client(&server)
        .playlist_tracks(&PlaylistId::from("p1"), 100, 0)
        .await
        .unwrap_err();

    match err {
        ReleasifyError::MalformedResponse { context, .. } => {
            assert_eq!(context, "GET /playlists/{id}/tracks")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_not_found_is_api_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/playlists/missing");
            then.status(404)
                .json_body(json!({ "error": { "status": 404, "message": "Not found." } }));
        })
        .await;

    let err = client(&server)
        .playlist_name(&PlaylistId::from("missing"))
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    match err {
        ReleasifyError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert!(message.contains("Not found."));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_bad_gateway_is_retried_until_attempts_run_out() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(502);
        })
        .await;

    let err = client(&server).current_user_id().await.unwrap_err();

    mock.assert_hits_async(MAX_ATTEMPTS as usize).await;
    assert!(matches!(err, ReleasifyError::Api { status, .. } if status.as_u16() == 502));
}

#[tokio::test]
async fn test_short_retry_after_is_honoured() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(429).header("retry-after", "0");
        })
        .await;

    let err = client(&server).current_user_id().await.unwrap_err();

    mock.assert_hits_async(MAX_ATTEMPTS as usize).await;
    assert!(matches!(err, ReleasifyError::Api { status, .. } if status.as_u16() == 429));
}

#[tokio::test]
async fn test_long_retry_after_gives_up_at_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(429).header("retry-after", "3600");
        })
        .await;

    let err = client(&server).current_user_id().await.unwrap_err();

    mock.assert_hits_async(1).await;
    assert!(matches!(err, ReleasifyError::Api { status, .. } if status.as_u16() == 429));
}
