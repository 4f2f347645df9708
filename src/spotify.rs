//! Music-service HTTP client (Spotify Web API).
//!
//! Implements catalog search, album track listings, and the playlist
//! read/write endpoints. The bearer token and user id are passed in at
//! construction; token acquisition and refresh live outside this crate.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::api::{AlbumRef, ApiError, MusicService, PlaylistSummary, TrackEntry};
use crate::models::{PlaylistResult, PlaylistSpec};

const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SpotifyClient {
    http: Client,
    access_token: String,
    user_id: String,
}

impl SpotifyClient {
    pub fn new(access_token: String, user_id: String) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            access_token,
            user_id,
        })
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), body));
        }

        Ok(response)
    }

    fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(request)?
            .json()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl MusicService for SpotifyClient {
    fn search_albums(&self, query: &str) -> Result<Vec<AlbumRef>, ApiError> {
        let response: SearchResponse = self.send_json(
            self.http
                .get(format!("{SPOTIFY_BASE_URL}/search"))
                .query(&[("q", query), ("type", "album")]),
        )?;

        Ok(response
            .albums
            .items
            .into_iter()
            .map(|album| AlbumRef {
                id: album.id,
                name: album.name,
            })
            .collect())
    }

    fn album_tracks(&self, album_id: &str, limit: usize) -> Result<Vec<TrackEntry>, ApiError> {
        let limit = limit.to_string();
        let response: TracksResponse = self.send_json(
            self.http
                .get(format!("{SPOTIFY_BASE_URL}/albums/{album_id}/tracks"))
                .query(&[("limit", limit.as_str())]),
        )?;

        Ok(response
            .items
            .into_iter()
            .map(|track| TrackEntry {
                entry_type: track.entry_type,
                uri: track.uri,
            })
            .collect())
    }

    fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, ApiError> {
        let response: PlaylistsResponse =
            self.send_json(self.http.get(format!("{SPOTIFY_BASE_URL}/me/playlists")))?;

        Ok(response
            .items
            .into_iter()
            .map(|playlist| PlaylistSummary {
                name: playlist.name,
                description: playlist.description,
            })
            .collect())
    }

    fn create_playlist(&self, spec: &PlaylistSpec) -> Result<PlaylistResult, ApiError> {
        let response: CreatePlaylistResponse = self.send_json(
            self.http
                .post(format!("{SPOTIFY_BASE_URL}/users/{}/playlists", self.user_id))
                .json(&json!({
                    "name": spec.title,
                    "description": spec.description,
                    "public": false,
                })),
        )?;

        Ok(PlaylistResult {
            id: response.id,
            external_url: response.external_urls.spotify,
        })
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        self.send(
            self.http
                .post(format!("{SPOTIFY_BASE_URL}/playlists/{playlist_id}/tracks"))
                .json(&json!({ "uris": uris })),
        )?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    albums: AlbumsPage,
}

#[derive(Deserialize)]
struct AlbumsPage {
    #[serde(default)]
    items: Vec<AlbumItem>,
}

#[derive(Deserialize)]
struct AlbumItem {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct TracksResponse {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Deserialize)]
struct TrackItem {
    #[serde(rename = "type")]
    entry_type: String,
    uri: String,
}

#[derive(Deserialize)]
struct PlaylistsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct CreatePlaylistResponse {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: String,
}
