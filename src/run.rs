//! Run orchestration: collect, filter, match, assemble.

use crate::api::{ApiError, MusicService, VideoPlatform};
use crate::matcher::CatalogMatcher;
use crate::models::{FilterCriteria, RunOutcome};
use crate::progress::create_progress_bar;
use crate::{assemble, collect, filter};

/// Drive one full run and return its terminal state. Empty results at any
/// stage are reported outcomes; only transport failures are errors.
pub fn generate_playlist(
    platform: &impl VideoPlatform,
    music: &impl MusicService,
    channel: &str,
    criteria: &FilterCriteria,
) -> Result<RunOutcome, ApiError> {
    let uploads = collect::collect_all(platform, channel)?;

    let reviews: Vec<_> = uploads
        .into_iter()
        .filter(|item| filter::include(item, criteria))
        .collect();
    if reviews.is_empty() {
        return Ok(RunOutcome::NoReviewsMatched);
    }

    let matcher = CatalogMatcher::new();
    let pb = create_progress_bar(reviews.len() as u64, "Phase 2: Matching albums");
    let mut track_uris: Vec<String> = Vec::new();
    let mut albums_found = 0usize;

    for item in &reviews {
        match matcher.match_album(music, item)? {
            Some(album) => {
                if album.truncated {
                    pb.println(format!(
                        "Track listing for \"{}\" may be truncated",
                        item.title
                    ));
                }
                track_uris.extend(album.track_uris);
                albums_found += 1;
            }
            None => pb.println(format!("No catalog album for \"{}\"", item.title)),
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("Phase 2: {albums_found} albums found in catalog"));

    if track_uris.is_empty() {
        return Ok(RunOutcome::NoAlbumsFound);
    }

    let spec = assemble::build_spec(criteria);
    if assemble::find_existing(music, &spec)? {
        return Ok(RunOutcome::PlaylistExists);
    }

    let playlist = assemble::create_and_populate(music, &spec, &track_uris)?;
    Ok(RunOutcome::Created(playlist))
}
