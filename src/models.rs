//! Core data models for the playlist run.
//!
//! Everything here is plain data passed between the pipeline phases;
//! nothing is persisted beyond the remote playlist itself.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;

/// A single video from the channel's upload listing, with parsed
/// description metadata attached by the collector.
#[derive(Clone, Debug)]
pub struct UploadItem {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    /// Empty when the description does not follow the review convention.
    pub info: ExtractedInfo,
    /// Reviewer score token ("7", "CLASSIC", ...), when one was found.
    pub score: Option<String>,
}

/// Artist, album and genre list pulled from an info line shaped like
/// `Artist - Album / Label / Genre1, Genre2`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedInfo {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genres: Vec<String>,
}

/// Caller-supplied filters, fixed for the whole run.
#[derive(Clone, Debug)]
pub struct FilterCriteria {
    pub lower_date: DateTime<Utc>,
    pub upper_date: DateTime<Utc>,
    /// Accepted score tokens; `None` accepts everything. Scores are open
    /// strings ("CLASSIC" is as valid as "7"), membership is exact.
    pub wanted_scores: Option<FxHashSet<String>>,
    /// Accepted genres; matching is case-insensitive substring containment.
    pub wanted_genres: Option<Vec<String>>,
}

/// Track URIs of one matched album, in catalog listing order.
#[derive(Clone, Debug, Default)]
pub struct MatchedAlbum {
    pub track_uris: Vec<String>,
    /// Set when the listing filled its first page. Later pages are never
    /// fetched, so longer albums lose their tail.
    pub truncated: bool,
}

/// Title and description of the playlist to create. Visibility is always
/// private.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaylistSpec {
    pub title: String,
    pub description: String,
}

/// Reference to the playlist that a run created.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaylistResult {
    pub id: String,
    pub external_url: String,
}

/// Terminal state of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// Nothing passed the review filters.
    NoReviewsMatched,
    /// Reviews matched but the catalog yielded zero track URIs.
    NoAlbumsFound,
    /// An identical playlist (same title and description) already exists.
    PlaylistExists,
    Created(PlaylistResult),
}
