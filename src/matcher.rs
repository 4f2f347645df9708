//! Catalog matching.
//!
//! Joins an extracted {artist, album} pair against the music catalog's
//! search and pulls the album's track URIs. Matching is a literal query
//! with no normalization or ranking of our own.

use crate::api::{AlbumRef, ApiError, MusicService};
use crate::models::{MatchedAlbum, UploadItem};

/// Page size for album track listings. Only the first page is fetched;
/// albums longer than this come back with `MatchedAlbum::truncated` set.
pub const TRACKS_PAGE_SIZE: usize = 20;

/// Selects one album from ranked search results. A ranking or
/// disambiguation strategy can slot in here without touching the
/// pipeline.
pub trait MatchStrategy {
    fn select<'a>(&self, candidates: &'a [AlbumRef]) -> Option<&'a AlbumRef>;
}

/// Trusts the search ranking: the first candidate wins. A known source of
/// false positives on ambiguous album titles.
pub struct FirstResult;

impl MatchStrategy for FirstResult {
    fn select<'a>(&self, candidates: &'a [AlbumRef]) -> Option<&'a AlbumRef> {
        candidates.first()
    }
}

pub struct CatalogMatcher<S = FirstResult> {
    strategy: S,
}

impl CatalogMatcher<FirstResult> {
    pub fn new() -> Self {
        Self { strategy: FirstResult }
    }
}

impl Default for CatalogMatcher<FirstResult> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MatchStrategy> CatalogMatcher<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// The literal search query, `"<album> <artist>"`, or `None` when the
    /// description yielded no usable pair.
    pub fn search_query(item: &UploadItem) -> Option<String> {
        match (&item.info.album, &item.info.artist) {
            (Some(album), Some(artist)) => Some(format!("{album} {artist}")),
            _ => None,
        }
    }

    /// Match one item against the catalog: search, pick a candidate, fetch
    /// its tracks. `Ok(None)` means no query or no candidate - never an
    /// error.
    pub fn match_album(
        &self,
        service: &impl MusicService,
        item: &UploadItem,
    ) -> Result<Option<MatchedAlbum>, ApiError> {
        let Some(query) = Self::search_query(item) else {
            return Ok(None);
        };

        let candidates = service.search_albums(&query)?;
        let Some(album) = self.strategy.select(&candidates) else {
            return Ok(None);
        };

        let entries = service.album_tracks(&album.id, TRACKS_PAGE_SIZE)?;
        let truncated = entries.len() == TRACKS_PAGE_SIZE;
        let track_uris = entries
            .into_iter()
            .filter(|entry| entry.entry_type == "track")
            .map(|entry| entry.uri)
            .collect();

        Ok(Some(MatchedAlbum { track_uris, truncated }))
    }
}
