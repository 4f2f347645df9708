//! External capability contracts.
//!
//! Both remote services are consumed through traits so the pipeline can
//! run against fakes in tests; `youtube` and `spotify` hold the HTTP
//! implementations. Clients are plain structs passed by reference - no
//! ambient session state.

use thiserror::Error;

use crate::models::{PlaylistResult, PlaylistSpec, UploadItem};

/// Failure from either remote service. Always fatal for the run: a single
/// attempt is made per call, with no retry and no partial degradation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("channel not found: {0}")]
    ChannelNotFound(String),
}

/// One page of a channel's upload listing.
#[derive(Debug, Default)]
pub struct UploadsPage {
    pub items: Vec<UploadItem>,
    pub next_page_token: Option<String>,
}

/// Album candidate from a catalog search, in ranking order.
#[derive(Clone, Debug, PartialEq)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
}

/// One entry of an album's track listing. Listings can interleave other
/// entry kinds, so the type tag travels with the URI.
#[derive(Clone, Debug)]
pub struct TrackEntry {
    pub entry_type: String,
    pub uri: String,
}

/// Name and description of one of the caller's existing playlists.
#[derive(Clone, Debug)]
pub struct PlaylistSummary {
    pub name: String,
    pub description: String,
}

/// Upload-listing capability of the video platform.
pub trait VideoPlatform {
    /// Resolve a channel handle to its uploads playlist id.
    fn resolve_uploads_playlist(&self, handle: &str) -> Result<String, ApiError>;

    /// Fetch one page of the uploads playlist.
    fn list_uploads(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<UploadsPage, ApiError>;
}

/// Search and playlist capabilities of the music service.
pub trait MusicService {
    fn search_albums(&self, query: &str) -> Result<Vec<AlbumRef>, ApiError>;

    fn album_tracks(&self, album_id: &str, limit: usize) -> Result<Vec<TrackEntry>, ApiError>;

    fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, ApiError>;

    fn create_playlist(&self, spec: &PlaylistSpec) -> Result<PlaylistResult, ApiError>;

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError>;
}

#[cfg(test)]
pub(crate) mod fakes {
    //! Call-recording in-memory stand-ins for both services.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::models::ExtractedInfo;

    /// Build an upload as the wire layer would: metadata attachment is the
    /// collector's job.
    pub fn upload(
        video_id: &str,
        title: &str,
        description: &str,
        published_at: DateTime<Utc>,
    ) -> UploadItem {
        UploadItem {
            video_id: video_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            published_at,
            info: ExtractedInfo::default(),
            score: None,
        }
    }

    /// Serves canned upload pages in order, handing out "page-N" tokens.
    pub struct FakeVideoPlatform {
        pub uploads_playlist: String,
        pub pages: Vec<Vec<UploadItem>>,
        pub list_calls: RefCell<Vec<Option<String>>>,
    }

    impl FakeVideoPlatform {
        pub fn new(pages: Vec<Vec<UploadItem>>) -> Self {
            Self {
                uploads_playlist: "uploads-1".to_string(),
                pages,
                list_calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl VideoPlatform for FakeVideoPlatform {
        fn resolve_uploads_playlist(&self, _handle: &str) -> Result<String, ApiError> {
            Ok(self.uploads_playlist.clone())
        }

        fn list_uploads(
            &self,
            playlist_id: &str,
            page_token: Option<&str>,
        ) -> Result<UploadsPage, ApiError> {
            assert_eq!(playlist_id, self.uploads_playlist);
            self.list_calls
                .borrow_mut()
                .push(page_token.map(str::to_string));

            let index = match page_token {
                None => 0,
                Some(token) => token.trim_start_matches("page-").parse::<usize>().unwrap(),
            };
            let items = self.pages.get(index).cloned().unwrap_or_default();
            let next_page_token = if index + 1 < self.pages.len() {
                Some(format!("page-{}", index + 1))
            } else {
                None
            };

            Ok(UploadsPage { items, next_page_token })
        }
    }

    /// Keyed canned responses plus a record of every call received.
    #[derive(Default)]
    pub struct FakeMusicService {
        pub search_results: HashMap<String, Vec<AlbumRef>>,
        pub tracks_by_album: HashMap<String, Vec<TrackEntry>>,
        pub playlists: Vec<PlaylistSummary>,
        pub search_calls: RefCell<Vec<String>>,
        pub track_calls: RefCell<Vec<(String, usize)>>,
        pub playlist_listings: RefCell<usize>,
        pub created: RefCell<Vec<PlaylistSpec>>,
        pub added: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeMusicService {
        /// One searchable album whose listing is all plain tracks.
        pub fn with_album(query: &str, album_id: &str, track_uris: &[&str]) -> Self {
            let mut service = Self::default();
            service.search_results.insert(
                query.to_string(),
                vec![AlbumRef {
                    id: album_id.to_string(),
                    name: album_id.to_string(),
                }],
            );
            service.tracks_by_album.insert(
                album_id.to_string(),
                track_uris
                    .iter()
                    .map(|uri| TrackEntry {
                        entry_type: "track".to_string(),
                        uri: uri.to_string(),
                    })
                    .collect(),
            );
            service
        }
    }

    impl MusicService for FakeMusicService {
        fn search_albums(&self, query: &str) -> Result<Vec<AlbumRef>, ApiError> {
            self.search_calls.borrow_mut().push(query.to_string());
            Ok(self.search_results.get(query).cloned().unwrap_or_default())
        }

        fn album_tracks(&self, album_id: &str, limit: usize) -> Result<Vec<TrackEntry>, ApiError> {
            self.track_calls
                .borrow_mut()
                .push((album_id.to_string(), limit));
            Ok(self
                .tracks_by_album
                .get(album_id)
                .cloned()
                .unwrap_or_default())
        }

        fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, ApiError> {
            *self.playlist_listings.borrow_mut() += 1;
            Ok(self.playlists.clone())
        }

        fn create_playlist(&self, spec: &PlaylistSpec) -> Result<PlaylistResult, ApiError> {
            self.created.borrow_mut().push(spec.clone());
            Ok(PlaylistResult {
                id: "playlist-1".to_string(),
                external_url: "https://open.spotify.com/playlist/playlist-1".to_string(),
            })
        }

        fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
            self.added
                .borrow_mut()
                .push((playlist_id.to_string(), uris.to_vec()));
            Ok(())
        }
    }
}
