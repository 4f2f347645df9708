//! Candidate filtering.
//!
//! Decides which collected uploads are album reviews worth matching.
//! Review detection is a title-substring heuristic; the upstream API has
//! no structured "is a review" flag.

use crate::models::{FilterCriteria, UploadItem};

/// Title substrings that mark an upload as a review. Case-sensitive on
/// purpose: the channel writes these in caps, and lowercase occurrences
/// are usually chatter.
pub const REVIEW_MARKERS: [&str; 3] = ["ALBUM REVIEW", "NOT GOOD", "NOT BAD"];

pub fn is_review_title(title: &str) -> bool {
    REVIEW_MARKERS.iter().any(|marker| title.contains(marker))
}

/// Genre filter: any wanted genre contained in any item genre, both sides
/// lower-cased and trimmed. Containment is one-directional, so wanting
/// "rock" accepts an item tagged "Alt Rock" but not the other way round.
pub fn genre_match(genres: &[String], wanted: Option<&[String]>) -> bool {
    let Some(wanted) = wanted else {
        return true;
    };
    if wanted.is_empty() {
        return true;
    }

    let wanted: Vec<String> = wanted.iter().map(|g| g.trim().to_lowercase()).collect();
    genres
        .iter()
        .map(|g| g.trim().to_lowercase())
        .any(|genre| wanted.iter().any(|w| genre.contains(w.as_str())))
}

/// True iff the item passes every active criterion: publish date inside
/// the window (inclusive at both ends), review-marker title, score
/// membership, and the genre test. An item without an extracted score or
/// genres fails the corresponding filter when one is set.
pub fn include(item: &UploadItem, criteria: &FilterCriteria) -> bool {
    if item.published_at < criteria.lower_date || item.published_at > criteria.upper_date {
        return false;
    }

    if !is_review_title(&item.title) {
        return false;
    }

    if let Some(scores) = &criteria.wanted_scores {
        match &item.score {
            Some(score) if scores.contains(score) => {}
            _ => return false,
        }
    }

    genre_match(&item.info.genres, criteria.wanted_genres.as_deref())
}
