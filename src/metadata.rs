use crate::category::category_name;
use crate::error::MetadataError;
use crate::reconcile::{reconcile, Batch};
use crate::record::{VideoListResponse, VideoRecord};
use crate::youtube::videos::{VideoSource, YouTubeClient};
use crate::youtube::Credentials;
use chrono::{DateTime, Utc};
use std::ops::{Bound, RangeBounds};

/// Read-only view of one position in a [`VideoMetadata`] batch.
///
/// Optional fields (category id, channel id, channel title, tags) fall back to
/// empty values. Mandatory fields (id, title, description, publish time) return
/// [`MetadataError::MissingField`] when the record is absent or lacks them.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    index: usize,
    record: Option<&'a VideoRecord>,
}

impl<'a> Entry<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> Option<&'a VideoRecord> {
        self.record
    }

    /// Whether the API returned anything for this position.
    pub fn is_available(&self) -> bool {
        self.record.is_some()
    }

    fn missing(&self, field: &'static str) -> MetadataError {
        MetadataError::MissingField {
            field,
            index: self.index,
        }
    }

    pub fn id(&self) -> Result<&'a str, MetadataError> {
        self.record
            .and_then(|r| r.id.as_deref())
            .ok_or_else(|| self.missing("id"))
    }

    pub fn category_id(&self) -> &'a str {
        self.record
            .and_then(|r| r.snippet_field(|s| s.category_id.as_ref()))
            .unwrap_or_default()
    }

    pub fn category_name(&self) -> Result<&'static str, MetadataError> {
        let id = self.category_id();
        category_name(id).ok_or_else(|| MetadataError::UnknownCategory(id.to_string()))
    }

    pub fn channel_id(&self) -> &'a str {
        self.record
            .and_then(|r| r.snippet_field(|s| s.channel_id.as_ref()))
            .unwrap_or_default()
    }

    pub fn channel_title(&self) -> &'a str {
        self.record
            .and_then(|r| r.snippet_field(|s| s.channel_title.as_ref()))
            .unwrap_or_default()
    }

    pub fn title(&self) -> Result<&'a str, MetadataError> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.title.as_ref()))
            .ok_or_else(|| self.missing("title"))
    }

    /// Tags attached to the video; empty when the uploader set none.
    pub fn keywords(&self) -> &'a [String] {
        self.record
            .and_then(|r| r.snippet.as_ref())
            .and_then(|s| s.tags.as_deref())
            .unwrap_or_default()
    }

    pub fn description(&self) -> Result<&'a str, MetadataError> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.description.as_ref()))
            .ok_or_else(|| self.missing("description"))
    }

    /// Raw RFC 3339 `publishedAt` value.
    pub fn time_published(&self) -> Result<&'a str, MetadataError> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.published_at.as_ref()))
            .ok_or_else(|| self.missing("publishedAt"))
    }

    pub fn published_at(&self) -> Result<DateTime<Utc>, MetadataError> {
        let raw = self.time_published()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| MetadataError::InvalidTimestamp {
                value: raw.to_string(),
                source,
            })
    }

    pub fn default_language(&self) -> Option<&'a str> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.default_language.as_ref()))
    }

    pub fn default_audio_language(&self) -> Option<&'a str> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.default_audio_language.as_ref()))
    }

    /// `none`, `upcoming` or `live`.
    pub fn live_broadcast_content(&self) -> Option<&'a str> {
        self.record
            .and_then(|r| r.snippet_field(|s| s.live_broadcast_content.as_ref()))
    }
}

/// Options accepted by [`VideoMetadata::fetch`].
#[derive(Debug, Default)]
pub struct FetchOptions {
    video_ids: Vec<String>,
    dev_key: Option<String>,
    client: Option<YouTubeClient>,
    json: Option<VideoListResponse>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one id. A comma separated list is split into its ids; empty
    /// segments are skipped, so `"a,,b"` requests two ids and the batch has
    /// two positions, not three.
    pub fn video_id(mut self, video_id: &str) -> Self {
        self.video_ids.extend(
            video_id
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn video_ids<I, S>(mut self, video_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.video_ids.extend(video_ids.into_iter().map(Into::into));
        self
    }

    pub fn dev_key(mut self, dev_key: impl Into<String>) -> Self {
        self.dev_key = Some(dev_key.into()).filter(|k| !k.is_empty());
        self
    }

    /// Pre-built client; takes precedence over `dev_key`.
    pub fn client(mut self, client: YouTubeClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Pre-fetched response; no request is made.
    pub fn json(mut self, json: VideoListResponse) -> Self {
        self.json = Some(json);
        self
    }

    fn resolve_client(&mut self) -> Result<YouTubeClient, MetadataError> {
        if let Some(client) = self.client.take() {
            return Ok(client);
        }
        match self.dev_key.take() {
            Some(key) => Ok(YouTubeClient::new(Credentials::ApiKey(key))),
            None => Err(MetadataError::Configuration(
                "either `dev_key` or `client` must be specified".to_string(),
            )),
        }
    }
}

/// Metadata for a batch of videos, index-aligned with the requested ids.
///
/// Positions the API could not resolve hold no record; check
/// [`is_available`](Self::is_available) before reading mandatory fields.
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    batch: Batch,
    current: usize,
    next_index: usize,
}

impl VideoMetadata {
    pub fn from_batch(batch: Batch) -> Self {
        Self {
            batch,
            current: 0,
            next_index: 0,
        }
    }

    /// Takes a response as-is: every item is a present record.
    pub fn from_response(response: VideoListResponse) -> Self {
        Self::from_batch(response.items.into_iter().map(Some).collect())
    }

    /// Aligns a response with the ids it was requested for.
    pub fn from_response_for<S: AsRef<str>>(
        video_ids: &[S],
        response: VideoListResponse,
    ) -> Result<Self, MetadataError> {
        Ok(Self::from_batch(reconcile(video_ids, response.items)?))
    }

    pub async fn fetch(mut options: FetchOptions) -> Result<Self, MetadataError> {
        if let Some(json) = options.json.take() {
            if options.video_ids.is_empty() {
                return Ok(Self::from_response(json));
            }
            return Self::from_response_for(&options.video_ids, json);
        }

        let client = options.resolve_client()?;
        Self::fetch_from(&client, &options.video_ids).await
    }

    pub async fn fetch_from<C: VideoSource>(
        source: &C,
        video_ids: &[String],
    ) -> Result<Self, MetadataError> {
        if video_ids.is_empty() {
            return Ok(Self::default());
        }
        let response = source.list_videos(video_ids).await?;
        Self::from_response_for(video_ids, response)
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.batch.iter().filter(|r| r.is_some()).count()
    }

    pub fn entry(&self, index: usize) -> Option<Entry<'_>> {
        self.batch.get(index).map(|record| Entry {
            index,
            record: record.as_ref(),
        })
    }

    /// Entry at the cursor. Reads as absent on an empty batch.
    pub fn current(&self) -> Entry<'_> {
        self.entry(self.current).unwrap_or(Entry {
            index: self.current,
            record: None,
        })
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.next_index = 0;
    }

    pub fn has_next(&self) -> bool {
        self.next_index < self.batch.len()
    }

    /// Moves the cursor to the next position and returns its entry, or `None`
    /// once every position has been visited. The cursor stays on the last
    /// entry after the end is reached.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Entry<'_>> {
        if !self.has_next() {
            return None;
        }
        self.current = self.next_index;
        self.next_index += 1;
        self.entry(self.current)
    }

    /// Walks every position without touching the cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.batch.iter().enumerate(),
        }
    }

    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self, MetadataError> {
        let len = self.batch.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if start > end || end > len {
            return Err(MetadataError::IndexOutOfRange { start, end, len });
        }
        Ok(Self::from_batch(self.batch[start..end].to_vec()))
    }

    pub fn select(&self, index: usize) -> Result<Self, MetadataError> {
        self.slice(index..=index)
    }

    pub fn is_available(&self) -> bool {
        self.current().is_available()
    }

    pub fn id(&self) -> Result<&str, MetadataError> {
        self.current().id()
    }

    pub fn category_id(&self) -> &str {
        self.current().category_id()
    }

    pub fn category_name(&self) -> Result<&'static str, MetadataError> {
        self.current().category_name()
    }

    pub fn channel_id(&self) -> &str {
        self.current().channel_id()
    }

    pub fn channel_title(&self) -> &str {
        self.current().channel_title()
    }

    pub fn title(&self) -> Result<&str, MetadataError> {
        self.current().title()
    }

    pub fn keywords(&self) -> &[String] {
        self.current().keywords()
    }

    pub fn description(&self) -> Result<&str, MetadataError> {
        self.current().description()
    }

    pub fn time_published(&self) -> Result<&str, MetadataError> {
        self.current().time_published()
    }

    pub fn published_at(&self) -> Result<DateTime<Utc>, MetadataError> {
        self.current().published_at()
    }
}

pub struct Iter<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Option<VideoRecord>>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, record)| Entry {
            index,
            record: record.as_ref(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a VideoMetadata {
    type Item = Entry<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
