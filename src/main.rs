use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use chatlist::{cli, config, error, types::PkceToken};
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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Extract music links from a chat export
    Extract(ExtractOptions),

    /// Find Spotify equivalents of extracted Apple Music links
    Match(MatchOptions),

    #[clap(about = "Create playlists from extracted and matched links")]
    Playlist(PlaylistOptions),

    /// Serve the HTTP API
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractOptions {
    /// Chat export to scan
    file: PathBuf,

    /// Print the extracted links as a table
    #[clap(long)]
    table: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MatchOptions {
    /// Read links from this chat export instead of the last extraction
    #[clap(long)]
    file: Option<PathBuf>,

    /// Print the results as a table
    #[clap(long)]
    table: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist name; several parts get " (Part i/n)" appended
    #[clap(long, default_value = cli::DEFAULT_PLAYLIST_NAME)]
    name: String,

    #[clap(long, default_value = cli::DEFAULT_PLAYLIST_DESCRIPTION)]
    description: String,

    /// Weighted items per playlist (track = 1, album = 10)
    #[clap(long)]
    capacity: Option<usize>,

    /// Show the plan without creating anything
    #[clap(long)]
    dry_run: bool,

    /// Drop albums the catalog rejected from the match cache
    #[clap(long)]
    prune_rejected: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Extract(opt) => cli::extract(opt.file, opt.table).await,
        Command::Match(opt) => cli::match_links(opt.file, opt.table).await,
        Command::Playlist(opt) => {
            cli::playlist(cli::PlaylistArgs {
                name: opt.name,
                description: opt.description,
                capacity: opt.capacity.unwrap_or_else(config::playlist_capacity),
                dry_run: opt.dry_run,
                prune_rejected: opt.prune_rejected,
            })
            .await
        }
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
