use crate::youtube::{Credentials, YOUTUBE_API_BASE};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            api_base: YOUTUBE_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|s| !s.is_empty());

        let api_key = non_empty("YOUTUBE_API_KEY");
        let access_token = non_empty("YOUTUBE_ACCESS_TOKEN");
        let api_base = non_empty("YOUTUBE_API_BASE")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| YOUTUBE_API_BASE.to_string());

        if api_key.is_none() && access_token.is_none() {
            tracing::warn!(
                "YOUTUBE_API_KEY or YOUTUBE_ACCESS_TOKEN not set. Video metadata cannot be fetched."
            );
        }

        Self {
            api_key,
            access_token,
            api_base,
        }
    }

    /// The developer key wins when both are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        self.api_key
            .clone()
            .map(Credentials::ApiKey)
            .or_else(|| self.access_token.clone().map(Credentials::AccessToken))
    }
}
