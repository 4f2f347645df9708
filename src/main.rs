use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use rustc_hash::FxHashSet;
use std::time::Instant;

use tnd_list_maker::models::{FilterCriteria, RunOutcome};
use tnd_list_maker::progress;
use tnd_list_maker::run::generate_playlist;
use tnd_list_maker::spotify::SpotifyClient;
use tnd_list_maker::youtube::YouTubeClient;

#[derive(Parser)]
#[command(name = "tnd-list-maker")]
#[command(about = "Build a streaming playlist from a channel's recent album reviews")]
struct Args {
    /// Channel handle whose uploads are scanned
    #[arg(long, default_value = "theneedledrop")]
    channel: String,

    /// Lookback window in days
    #[arg(short, long, default_value_t = 7)]
    days: i64,

    /// Reviewer scores to accept (comma-separated, e.g. "8,9,CLASSIC")
    #[arg(short, long)]
    scores: Option<String>,

    /// Genres to accept (comma-separated, case-insensitive)
    #[arg(short, long)]
    genres: Option<String>,

    /// Hide progress bars for tail-friendly output
    #[arg(long)]
    log_only: bool,
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    progress::set_log_only(args.log_only);

    let api_key = std::env::var("YOUTUBE_API_KEY").context("YOUTUBE_API_KEY is not set")?;
    let access_token =
        std::env::var("SPOTIFY_ACCESS_TOKEN").context("SPOTIFY_ACCESS_TOKEN is not set")?;
    let user_id = std::env::var("SPOTIFY_USER_ID").context("SPOTIFY_USER_ID is not set")?;

    let upper_date = Utc::now();
    let lower_date = upper_date - Duration::days(args.days);
    let criteria = FilterCriteria {
        lower_date,
        upper_date,
        wanted_scores: args
            .scores
            .as_deref()
            .map(|raw| split_csv(raw).into_iter().collect::<FxHashSet<_>>()),
        wanted_genres: args.genres.as_deref().map(split_csv),
    };

    let youtube = YouTubeClient::new(api_key).context("Failed to build the video client")?;
    let spotify =
        SpotifyClient::new(access_token, user_id).context("Failed to build the catalog client")?;

    let start = Instant::now();
    let outcome = generate_playlist(&youtube, &spotify, &args.channel, &criteria)
        .context("Playlist run failed")?;

    match outcome {
        RunOutcome::NoReviewsMatched => {
            println!("Unable to find any album reviews with given parameters..")
        }
        RunOutcome::NoAlbumsFound => println!("No albums found in Spotify"),
        RunOutcome::PlaylistExists => println!("Playlist already created. Exiting..."),
        RunOutcome::Created(playlist) => {
            println!("New playlist created: {}", playlist.external_url)
        }
    }
    println!("Elapsed: {}", progress::format_duration(start.elapsed()));

    Ok(())
}
