use crate::youtube::YouTubeApiError;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing field `{field}` for video at index {index}")]
    MissingField { field: &'static str, index: usize },

    #[error("Unknown category id: {0:?}")]
    UnknownCategory(String),

    /// The response contained an id that is not in the remainder of the request.
    /// The API only ever drops ids, so this means the response was out of order,
    /// duplicated, or not for this request.
    #[error("Returned video id {0:?} does not match any remaining requested id")]
    UnmatchedId(String),

    #[error("Range {start}..{end} out of bounds for {len} videos")]
    IndexOutOfRange { start: usize, end: usize, len: usize },

    #[error("Invalid publish timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Api(#[from] YouTubeApiError),
}
