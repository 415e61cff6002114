pub mod videos;

#[derive(Debug)]
pub struct YouTubeApiError {
    pub status: u16,
    pub message: String,
    pub reason: Option<String>,
}

impl YouTubeApiError {
    /// Failure that never produced an HTTP status (connect, TLS, decode).
    pub(crate) fn transport(message: String) -> Self {
        Self {
            status: 0,
            message,
            reason: None,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.reason.as_deref() == Some("quotaExceeded")
    }
}

impl std::fmt::Display for YouTubeApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "YouTube API error {}: {}", self.status, self.message)
    }
}

impl std::error::Error for YouTubeApiError {}

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// How requests to the Data API are authenticated.
#[derive(Clone)]
pub enum Credentials {
    /// Developer key, sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth access token, sent as a bearer token.
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(..)"),
        }
    }
}

impl Credentials {
    fn apply_to_url(&self, url: &str) -> String {
        match self {
            Credentials::ApiKey(key) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}key={}", url, sep, urlencoding::encode(key))
            }
            Credentials::AccessToken(_) => url.to_string(),
        }
    }
}

pub(crate) fn parse_api_error(status: u16, body: &serde_json::Value) -> YouTubeApiError {
    let reason = body["error"]["errors"][0]["reason"]
        .as_str()
        .map(|s| s.to_string());

    if status == 403 && reason.as_deref() == Some("quotaExceeded") {
        return YouTubeApiError {
            status: 403,
            message: "Quota exceeded".to_string(),
            reason,
        };
    }

    let message = body["error"]["message"]
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("YouTube API error: {}", status));

    YouTubeApiError {
        status,
        message,
        reason,
    }
}

pub async fn youtube_get(
    http: &reqwest::Client,
    url: &str,
    credentials: &Credentials,
) -> Result<serde_json::Value, YouTubeApiError> {
    let mut req = http.get(credentials.apply_to_url(url));
    if let Credentials::AccessToken(token) = credentials {
        req = req.bearer_auth(token);
    }

    let res = req
        .send()
        .await
        .map_err(|e| YouTubeApiError::transport(e.to_string()))?;

    let status = res.status().as_u16();
    if status >= 400 {
        let body: serde_json::Value = res.json().await.unwrap_or_default();
        let err = parse_api_error(status, &body);
        tracing::warn!("[youtube] {}", err);
        return Err(err);
    }

    res.json()
        .await
        .map_err(|e| YouTubeApiError::transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_key_appended_as_query() {
        let creds = Credentials::ApiKey("abc".to_string());
        let url = creds.apply_to_url(&format!("{}/videos?part=snippet", YOUTUBE_API_BASE));
        assert_eq!(
            url,
            "https://www.googleapis.com/youtube/v3/videos?part=snippet&key=abc"
        );
    }

    #[test]
    fn test_api_key_is_encoded() {
        let creds = Credentials::ApiKey("a b&c".to_string());
        let url = creds.apply_to_url("https://example.test/videos");
        assert_eq!(url, "https://example.test/videos?key=a%20b%26c");
    }

    #[test]
    fn test_access_token_leaves_url_untouched() {
        let creds = Credentials::AccessToken("tok".to_string());
        let url = creds.apply_to_url("https://example.test/videos?id=a");
        assert_eq!(url, "https://example.test/videos?id=a");
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let creds = Credentials::ApiKey("secret-key".to_string());
        assert!(!format!("{:?}", creds).contains("secret-key"));
    }

    #[test]
    fn test_parse_quota_exceeded() {
        let body = json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "reason": "quotaExceeded" }]
            }
        });
        let err = parse_api_error(403, &body);
        assert_eq!(err.status, 403);
        assert_eq!(err.message, "Quota exceeded");
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn test_parse_bad_key() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{ "reason": "badRequest" }]
            }
        });
        let err = parse_api_error(400, &body);
        assert_eq!(err.status, 400);
        assert_eq!(err.reason.as_deref(), Some("badRequest"));
        assert_eq!(err.message, "API key not valid. Please pass a valid API key.");
        assert!(!err.is_quota_exceeded());
    }

    #[test]
    fn test_parse_empty_body() {
        let err = parse_api_error(500, &serde_json::Value::Null);
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "YouTube API error: 500");
        assert!(err.reason.is_none());
    }

    #[test]
    fn test_display() {
        let err = YouTubeApiError::transport("connection refused".to_string());
        assert_eq!(err.to_string(), "YouTube API error 0: connection refused");
    }
}
