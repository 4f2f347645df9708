//! Video-platform HTTP client (YouTube Data API v3).
//!
//! Implements the upload-listing capability: resolve a channel handle to
//! its uploads playlist, then page through `playlistItems`. The API key
//! is passed in at construction; acquiring it is the caller's problem.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::api::{ApiError, UploadsPage, VideoPlatform};
use crate::models::{ExtractedInfo, UploadItem};

const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Fixed page size for the uploads listing.
pub const UPLOADS_PAGE_SIZE: usize = 50;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct YouTubeClient {
    http: Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(format!("{YOUTUBE_BASE_URL}/{path}"))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), body));
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl VideoPlatform for YouTubeClient {
    fn resolve_uploads_playlist(&self, handle: &str) -> Result<String, ApiError> {
        let response: ChannelListResponse = self.get_json(
            "channels",
            &[("part", "id,contentDetails"), ("forHandle", handle)],
        )?;

        response
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads)
            .ok_or_else(|| ApiError::ChannelNotFound(handle.to_string()))
    }

    fn list_uploads(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<UploadsPage, ApiError> {
        let max_results = UPLOADS_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "contentDetails,id,snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: PlaylistItemsResponse = self.get_json("playlistItems", &query)?;

        let mut items = Vec::with_capacity(response.items.len());
        for entry in response.items {
            let published_at = parse_published_at(&entry.content_details.video_published_at)?;
            items.push(UploadItem {
                video_id: entry.content_details.video_id,
                title: entry.snippet.title,
                description: entry.snippet.description,
                published_at,
                info: ExtractedInfo::default(),
                score: None,
            });
        }

        Ok(UploadsPage {
            items,
            next_page_token: response.next_page_token,
        })
    }
}

/// `videoPublishedAt` is ISO-8601 with an offset (usually `Z`).
fn parse_published_at(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ApiError::Parse(format!("videoPublishedAt {raw:?}: {e}")))
}

#[derive(Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelEntry {
    content_details: ChannelContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemEntry>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemEntry {
    snippet: Snippet,
    content_details: ItemContentDetails,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemContentDetails {
    video_id: String,
    video_published_at: String,
}
