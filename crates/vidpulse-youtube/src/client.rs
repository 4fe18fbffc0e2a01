//! HTTP client for the YouTube Data API v3.
//!
//! Only the `commentThreads` endpoint is used: one page of top-level
//! comments per video, newest first, as returned by the provider. Provider
//! rejections are parsed out of Google's JSON error envelope and surfaced
//! as [`YoutubeError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::types::{ApiErrorEnvelope, CommentThreadsResponse, TopLevelComment};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Maximum comments fetched per analysis run. A single page; no follow-up
/// pagination is performed even when the provider reports more.
pub const COMMENT_PAGE_SIZE: u32 = 100;

/// Client for the YouTube Data API.
///
/// Manages the HTTP client, API key, and endpoint URL. Use
/// [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production YouTube Data API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the resource instead of replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("commentThreads"))
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches one page of top-level comments for a video.
    ///
    /// An empty page deserializes to an empty `Vec` — distinguishing "no
    /// comments" from a provider rejection is the caller's concern.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] when the provider rejects the request
    ///   (private video, comments disabled, unknown video, quota exceeded).
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if a 2xx body does not match the
    ///   expected shape.
    pub async fn fetch_top_level_comments(
        &self,
        video_id: &str,
    ) -> Result<Vec<TopLevelComment>, YoutubeError> {
        let url = self.build_url(video_id);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Google wraps rejections in {"error": {"message": ...}}; fall
            // back to the raw body when the envelope itself is malformed.
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map_or_else(|_| body.trim().to_string(), |e| e.error.message);
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CommentThreadsResponse =
            serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
                context: format!("commentThreads(videoId={video_id})"),
                source: e,
            })?;

        Ok(parsed
            .items
            .into_iter()
            .map(TopLevelComment::from)
            .collect())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, the page-size cap, and the API key.
    fn build_url(&self, video_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("part", "snippet");
            pairs.append_pair("videoId", video_id);
            pairs.append_pair("maxResults", &COMMENT_PAGE_SIZE.to_string());
            pairs.append_pair("key", &self.api_key);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, "vidpulse-test/0", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("dQw4w9WgXcQ");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/commentThreads\
             ?part=snippet&videoId=dQw4w9WgXcQ&maxResults=100&key=test-key"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client.build_url("abc");
        assert!(
            url.as_str()
                .starts_with("https://www.googleapis.com/youtube/v3/commentThreads?"),
            "unexpected endpoint: {url}"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("a b&c");
        assert!(
            !url.as_str().contains("a b"),
            "video id should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = YoutubeClient::with_base_url("k", 30, "ua", "not a url");
        assert!(matches!(
            result,
            Err(YoutubeError::InvalidBaseUrl { .. })
        ));
    }
}
