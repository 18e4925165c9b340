use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use tracing::debug;

use crate::{
    engine::{
        pager::Pager,
        policy::{DestinationName, DestinationPlan, DestinationPolicy, destination_title},
        ports::{
            ALBUM_PAGE_SIZE, ALBUM_TRACKS_PAGE_SIZE, Catalog, Library, PLAYLIST_PAGE_SIZE,
            WRITE_BATCH_SIZE,
        },
        report::{DestinationReport, RunReport, SourceFailure},
        seen::SeenTracks,
    },
    errors::{ReleasifyError, Result},
    info, success,
    types::{AlbumGroups, AlbumId, ArtistId, NewPlaylist, PlaylistId, TrackId, UserId},
    warning,
    window::ReleaseWindow,
};

/// Artists and albums fully written to one destination. Entries are only
/// added after their tracks were written.
#[derive(Debug, Default)]
struct Expanded {
    artists: HashSet<ArtistId>,
    albums: HashSet<AlbumId>,
}

/// Walks playlist -> artists -> albums -> tracks and writes fresh releases
/// to destination playlists.
///
/// Every remote call is awaited before the next one starts. All artists of a
/// playlist are known before any album lookup, and all recent albums of an
/// artist before any track lookup.
pub struct Aggregator<'a, C, L> {
    catalog: &'a C,
    library: &'a L,
    window: ReleaseWindow,
    groups: AlbumGroups,
    now: DateTime<Utc>,
    progress: ProgressBar,
}

impl<'a, C: Catalog, L: Library> Aggregator<'a, C, L> {
    pub fn new(catalog: &'a C, library: &'a L, window: ReleaseWindow) -> Self {
        Self {
            catalog,
            library,
            window,
            groups: AlbumGroups::default(),
            now: Utc::now(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_album_groups(mut self, groups: AlbumGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Pins the end of the release window. Defaults to the moment the
    /// aggregator was built.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Distinct artists credited on any track of `playlist`. Local files and
    /// removed tracks contribute nothing.
    pub async fn collect_artists(&self, playlist: &PlaylistId) -> Result<BTreeSet<ArtistId>> {
        let library = self.library;
        let items = Pager::new(PLAYLIST_PAGE_SIZE, move |limit, offset| {
            library.playlist_tracks(playlist, limit, offset)
        })
        .collect_all()
        .await?;

        let artists: BTreeSet<ArtistId> = items
            .into_iter()
            .filter_map(|item| item.track)
            .flat_map(|track| track.artists)
            .filter_map(|artist| artist.id)
            .collect();

        debug!(playlist = %playlist, artists = artists.len(), "collected artists");
        Ok(artists)
    }

    /// Albums of `artist` in the configured groups released inside the window.
    pub async fn collect_recent_albums(&self, artist: &ArtistId) -> Result<BTreeSet<AlbumId>> {
        let catalog = self.catalog;
        let groups = &self.groups;
        let albums = Pager::new(ALBUM_PAGE_SIZE, move |limit, offset| {
            catalog.artist_albums(artist, groups, limit, offset)
        })
        .collect_all()
        .await?;

        let mut recent = BTreeSet::new();
        for album in albums {
            if self
                .window
                .contains(&album.release_date, album.release_date_precision, self.now)?
            {
                debug!(artist = %artist, album = %album.id, released = %album.release_date, "recent album");
                recent.insert(album.id);
            }
        }
        Ok(recent)
    }

    /// Every track on `album`, in album order, without repeats.
    pub async fn collect_tracks(&self, album: &AlbumId) -> Result<Vec<TrackId>> {
        let catalog = self.catalog;
        let tracks = Pager::new(ALBUM_TRACKS_PAGE_SIZE, move |limit, offset| {
            catalog.album_tracks(album, limit, offset)
        })
        .collect_all()
        .await?;

        let mut unique = HashSet::new();
        Ok(tracks
            .into_iter()
            .map(|t| t.id)
            .filter(|id| unique.insert(id.clone()))
            .collect())
    }

    /// Writes the tracks `destination` has not received yet, in batches of
    /// at most [`WRITE_BATCH_SIZE`]. Returns how many were added.
    pub async fn add_new_tracks(
        &self,
        user: &UserId,
        destination: &PlaylistId,
        tracks: &[TrackId],
        seen: &mut SeenTracks,
    ) -> Result<usize> {
        let fresh = seen.unseen(destination, tracks);
        for batch in fresh.chunks(WRITE_BATCH_SIZE) {
            self.library.add_tracks(user, destination, batch).await?;
            seen.record(destination, batch);
            debug!(playlist = %destination, tracks = batch.len(), "wrote batch");
        }
        Ok(fresh.len())
    }

    /// Creates the destinations `policy` asks for and fills them from
    /// `sources`.
    ///
    /// Only a failure to identify the current user fails the whole run. A
    /// failing source is recorded in the report and the remaining sources
    /// still run. Destinations created before a failure are kept.
    pub async fn run(&self, sources: &[PlaylistId], policy: &DestinationPolicy) -> Result<RunReport> {
        let user = self.library.current_user_id().await?;
        let mut seen = SeenTracks::new();
        let mut report = RunReport::default();

        for plan in policy.plan(sources) {
            let destination = self.fill_destination(&user, &plan, &mut seen).await;
            report.destinations.push(destination);
        }

        Ok(report)
    }

    async fn fill_destination(
        &self,
        user: &UserId,
        plan: &DestinationPlan,
        seen: &mut SeenTracks,
    ) -> DestinationReport {
        let created = match self.create_destination(user, &plan.name).await {
            Ok(created) => created,
            Err((name, error)) => {
                let error = Arc::new(error);
                self.progress
                    .suspend(|| warning!("Cannot create playlist {}: {}", name, error));
                let mut report = DestinationReport::new(name, None);
                report.failures = plan
                    .sources
                    .iter()
                    .map(|source| SourceFailure {
                        playlist_id: source.clone(),
                        error: Arc::clone(&error),
                    })
                    .collect();
                return report;
            }
        };

        let (name, playlist) = created;
        let destination = playlist.id.clone();
        let mut report = DestinationReport::new(name, Some(playlist));
        let mut expanded = Expanded::default();

        for source in &plan.sources {
            if let Err(error) = self
                .fill_from_source(user, source, &destination, &mut expanded, seen, &mut report)
                .await
            {
                self.progress
                    .suspend(|| warning!("Processing playlist {} failed: {}", source, error));
                report.failures.push(SourceFailure {
                    playlist_id: source.clone(),
                    error: Arc::new(error),
                });
            }
        }

        report
    }

    async fn create_destination(
        &self,
        user: &UserId,
        name: &DestinationName,
    ) -> std::result::Result<(String, NewPlaylist), (String, ReleasifyError)> {
        let base = match name {
            DestinationName::Fixed(base) => base.clone(),
            DestinationName::FromSource(source) => match self.library.playlist_name(source).await {
                Ok(base) => base,
                Err(e) => return Err((source.to_string(), e)),
            },
        };

        let title = destination_title(&base);
        match self.library.create_playlist(user, &title).await {
            Ok(playlist) => {
                self.progress.suspend(|| {
                    success!("Created new playlist: {}", title);
                    if let Some(url) = &playlist.url {
                        info!("{}", url);
                    }
                });
                Ok((title, playlist))
            }
            Err(e) => Err((title, e)),
        }
    }

    async fn fill_from_source(
        &self,
        user: &UserId,
        source: &PlaylistId,
        destination: &PlaylistId,
        expanded: &mut Expanded,
        seen: &mut SeenTracks,
        report: &mut DestinationReport,
    ) -> Result<()> {
        self.progress
            .set_message(format!("Reading artists of playlist {source}..."));
        let artists = self.collect_artists(source).await?;
        self.progress
            .suspend(|| info!("Found {} artists on playlist {}", artists.len(), source));

        let fresh: Vec<ArtistId> = artists
            .into_iter()
            .filter(|artist| !expanded.artists.contains(artist))
            .collect();
        let total = fresh.len();
        let mut added = 0;

        for (idx, artist) in fresh.iter().enumerate() {
            self.progress.set_message(format!(
                "Looking up releases ({current}/{total})",
                current = idx + 1,
                total = total
            ));

            let albums = self.collect_recent_albums(artist).await?;
            for album in albums {
                if expanded.albums.contains(&album) {
                    continue;
                }

                let tracks = self.collect_tracks(&album).await?;
                let count = self.add_new_tracks(user, destination, &tracks, seen).await?;
                expanded.albums.insert(album);
                report.albums_matched += 1;
                report.tracks_added += count;
                added += count;
            }
            expanded.artists.insert(artist.clone());
            report.artists_scanned += 1;
        }

        self.progress
            .suspend(|| success!("Added {} new tracks from playlist {}", added, source));
        Ok(())
    }
}
