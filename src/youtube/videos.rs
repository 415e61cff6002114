use crate::config::Config;
use crate::error::MetadataError;
use crate::record::VideoListResponse;
use crate::youtube::{youtube_get, Credentials, YouTubeApiError, YOUTUBE_API_BASE};
use std::future::Future;

pub const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

pub const VIDEO_FIELDS: &str = "items(id,snippet(categoryId,channelId,channelTitle,defaultAudioLanguage,defaultLanguage,description,liveBroadcastContent,publishedAt,tags,title))";

/// `videos.list` accepts at most this many ids per call.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Anything that can answer a `videos.list` call for a set of ids.
pub trait VideoSource {
    fn list_videos(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = Result<VideoListResponse, YouTubeApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct YouTubeClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_http(reqwest::Client::new(), credentials)
    }

    pub fn with_http(http: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials,
            base_url: YOUTUBE_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, MetadataError> {
        let credentials = config.credentials().ok_or_else(|| {
            MetadataError::Configuration(
                "either an API key or an access token must be configured".to_string(),
            )
        })?;
        Ok(Self::new(credentials).with_base_url(config.api_base.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn videos_url(&self, video_ids: &[String]) -> String {
        format!(
            "{}/videos?part={}&fields={}&id={}",
            self.base_url,
            VIDEO_PARTS,
            urlencoding::encode(VIDEO_FIELDS),
            video_ids.join(",")
        )
    }

    /// One URL per `MAX_IDS_PER_REQUEST` ids, in request order.
    fn videos_urls(&self, video_ids: &[String]) -> Vec<String> {
        video_ids
            .chunks(MAX_IDS_PER_REQUEST)
            .map(|batch| self.videos_url(batch))
            .collect()
    }
}

impl VideoSource for YouTubeClient {
    /// Requests over the per-call limit are split; the items of each call are
    /// appended in order so the result stays a subsequence of `video_ids`.
    async fn list_videos(
        &self,
        video_ids: &[String],
    ) -> Result<VideoListResponse, YouTubeApiError> {
        tracing::debug!("[videos] Fetching metadata for {} ids", video_ids.len());

        let mut items = Vec::with_capacity(video_ids.len());
        for url in self.videos_urls(video_ids) {
            let data = youtube_get(&self.http, &url, &self.credentials).await?;
            let response: VideoListResponse = serde_json::from_value(data).map_err(|e| {
                YouTubeApiError::transport(format!("Invalid videos.list body: {}", e))
            })?;
            items.extend(response.items);
        }

        tracing::debug!(
            "[videos] {} of {} ids resolved",
            items.len(),
            video_ids.len()
        );
        Ok(VideoListResponse { items })
    }
}
