use serde::Deserialize;

/// One `items[]` entry of a `videos.list` response.
///
/// Every field is optional on the wire so that a partial record still
/// deserializes; presence is checked when a field is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoRecord {
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub category_id: Option<String>,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published_at: Option<String>,
    pub default_language: Option<String>,
    pub default_audio_language: Option<String>,
    pub live_broadcast_content: Option<String>,
}

/// Raw `videos.list` response body. Only `items` is requested.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoRecord>,
}

impl VideoRecord {
    pub(crate) fn snippet_field<'a>(
        &'a self,
        f: impl FnOnce(&'a Snippet) -> Option<&'a String>,
    ) -> Option<&'a str> {
        self.snippet.as_ref().and_then(f).map(String::as_str)
    }
}
