use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use releasify::{
    cli, config, logger,
    types::{AlbumGroups, PkceToken},
    utils, warning,
    window::ReleaseWindow,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print diagnostic logs to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Collect recent releases from the artists of the given playlists
    Run(RunOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Playlist ids to scan (bare id, spotify:playlist: URI or share link)
    #[clap(required = true, num_args = 1..)]
    playlist_ids: Vec<String>,

    /// How far back (in days) to search for releases
    #[clap(
        short,
        long = "time_window",
        visible_alias = "time-window",
        default_value_t = ReleaseWindow::DEFAULT_DAYS
    )]
    time_window: u32,

    /// Keep one new playlist per source playlist
    #[clap(short, long, conflicts_with = "name")]
    separate: bool,

    /// Name of the combined playlist
    #[clap(short, long)]
    name: Option<String>,

    /// Release groups to include, comma separated
    #[clap(
        long,
        default_value = "album,single",
        value_parser = utils::parse_album_groups
    )]
    include_groups: AlbumGroups,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment: {}", e);
    }

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Run(opt) => {
            cli::run(
                opt.playlist_ids,
                opt.time_window,
                opt.separate,
                opt.name,
                opt.include_groups,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
