use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    engine::{Aggregator, DestinationPolicy},
    error, info,
    management::{AppTokenManager, TokenManager},
    spotify::SpotifyApi,
    success,
    types::AlbumGroups,
    utils, warning,
    window::ReleaseWindow,
};

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub async fn run(
    playlist_ids: Vec<String>,
    time_window: u32,
    separate: bool,
    name: Option<String>,
    album_groups: AlbumGroups,
) {
    let sources = utils::clean_playlist_ids(&playlist_ids);
    if sources.is_empty() {
        error!("No playlist ids given.");
    }
    if name.is_some() && sources.len() == 1 {
        warning!("--name only applies when several playlists are combined; ignoring it.");
    }

    let token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "Failed to load token. Please run releasify auth\n Error: {}",
            e
        ),
    };
    let app_token_mgr = match AppTokenManager::from_config() {
        Ok(manager) => manager,
        Err(e) => error!("Cannot set up application credentials: {}", e),
    };

    let library = SpotifyApi::for_user(token_mgr);
    let catalog = SpotifyApi::for_app(app_token_mgr);
    let policy = DestinationPolicy::from_options(separate, name);

    info!(
        "Looking for releases of the last {} days ({})",
        time_window, album_groups
    );

    let pb = spinner();
    let aggregator = Aggregator::new(&catalog, &library, ReleaseWindow::days(time_window))
        .with_album_groups(album_groups)
        .with_progress(pb.clone());

    let report = match aggregator.run(&sources, &policy).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            error!("Run failed: {}", e)
        }
    };
    pb.finish_and_clear();

    println!("{}", Table::new(report.rows()));

    if report.has_failures() {
        for failure in report.failures() {
            warning!("{}: {}", failure.playlist_id, failure.error);
        }
        error!(
            "{} source playlist(s) failed.",
            report.failures().count()
        );
    }

    success!("Added {} tracks in total.", report.total_tracks_added());
}
