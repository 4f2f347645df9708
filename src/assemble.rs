//! Playlist assembly.
//!
//! Computes the run's playlist title/description from the filters, checks
//! for an identical playlist from an earlier run, and writes the matched
//! track URIs in order.

use crate::api::{ApiError, MusicService};
use crate::models::{FilterCriteria, PlaylistResult, PlaylistSpec};

/// Maximum track URIs per playlist write call.
pub const TRACK_WRITE_BATCH: usize = 100;

/// Title and description derived from the run's date window and filters.
/// Score tokens render sorted so the same filters always produce the same
/// description, which is what the re-run check compares.
pub fn build_spec(criteria: &FilterCriteria) -> PlaylistSpec {
    let title = format!(
        "TND List Maker: {} - {}",
        criteria.lower_date.format("%m/%d/%Y"),
        criteria.upper_date.format("%m/%d/%Y"),
    );

    let scores = match &criteria.wanted_scores {
        Some(scores) if !scores.is_empty() => {
            let mut sorted: Vec<&str> = scores.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted.join(",")
        }
        _ => "All".to_string(),
    };
    let genres = match &criteria.wanted_genres {
        Some(genres) if !genres.is_empty() => genres.join(","),
        _ => "All".to_string(),
    };

    PlaylistSpec {
        title,
        description: format!("Score: {scores}. Genre: {genres}"),
    }
}

/// True when one of the caller's playlists matches the computed title AND
/// description exactly. A match on only one of the two is a different
/// playlist.
pub fn find_existing(service: &impl MusicService, spec: &PlaylistSpec) -> Result<bool, ApiError> {
    let playlists = service.user_playlists()?;
    Ok(playlists
        .iter()
        .any(|p| p.name == spec.title && p.description == spec.description))
}

/// Create the playlist and append the URIs in order, at most
/// [`TRACK_WRITE_BATCH`] per write. A failure mid-loop aborts and leaves
/// the playlist partially populated.
pub fn create_and_populate(
    service: &impl MusicService,
    spec: &PlaylistSpec,
    track_uris: &[String],
) -> Result<PlaylistResult, ApiError> {
    let playlist = service.create_playlist(spec)?;

    for chunk in track_uris.chunks(TRACK_WRITE_BATCH) {
        service.add_tracks(&playlist.id, chunk)?;
    }

    Ok(playlist)
}
