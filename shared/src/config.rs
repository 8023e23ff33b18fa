use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_FEED_URL: &str =
    "https://gist.githubusercontent.com/neysidev/bbd40032f0f4e167a1e6a8b3e99a490c/raw/";
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid feed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A station feed URL that has already been checked, so the HTTP capability
/// never sees something it cannot parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedEndpoint {
    url: String,
    host: String,
}

impl FeedEndpoint {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidUrl {
            url: truncate_url(raw),
            reason: reason.to_string(),
        };

        if raw.trim().is_empty() {
            return Err(invalid("URL cannot be empty"));
        }
        if raw.len() > MAX_URL_LENGTH {
            return Err(invalid(&format!(
                "URL exceeds maximum length of {MAX_URL_LENGTH} bytes"
            )));
        }

        let parsed = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(invalid(&format!(
                "invalid scheme '{scheme}', only 'http' and 'https' are allowed"
            )));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| invalid("URL must have a host"))?
            .to_lowercase();

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(invalid("credentials in URL are not allowed"));
        }

        Ok(Self {
            url: parsed.to_string(),
            host,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Default for FeedEndpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            host: "gist.githubusercontent.com".to_string(),
        }
    }
}

impl TryFrom<String> for FeedEndpoint {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FeedEndpoint> for String {
    fn from(endpoint: FeedEndpoint) -> Self {
        endpoint.url
    }
}

/// Where the station list comes from. Shells may send one of these before
/// mounting to point the core at a mirror of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub endpoint: FeedEndpoint,
}

impl FeedConfig {
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: FeedEndpoint::parse(url)?,
        })
    }
}

fn truncate_url(url: &str) -> String {
    if url.len() <= 100 {
        return url.to_string();
    }
    let mut end = 100;
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &url[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_valid() {
        let parsed = FeedEndpoint::parse(DEFAULT_FEED_URL).unwrap();
        assert_eq!(parsed, FeedEndpoint::default());
        assert_eq!(parsed.host(), "gist.githubusercontent.com");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = FeedEndpoint::parse("ftp://example.com/stations.json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref reason, .. } if reason.contains("ftp")));
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(FeedEndpoint::parse("").is_err());
        assert!(FeedEndpoint::parse("   ").is_err());
        assert!(FeedEndpoint::parse("not a url").is_err());
    }

    #[test]
    fn test_rejects_credentials() {
        let err = FeedEndpoint::parse("https://user:pw@example.com/feed").unwrap_err();
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn test_rejects_overlong_url() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        let err = FeedEndpoint::parse(&long).unwrap_err();
        match err {
            ConfigError::InvalidUrl { url, .. } => assert!(url.ends_with("...")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_host_is_lowercased() {
        let endpoint = FeedEndpoint::parse("https://Mirror.Example.COM/stations").unwrap();
        assert_eq!(endpoint.host(), "mirror.example.com");
    }

    #[test]
    fn test_config_deserializes() {
        let config: FeedConfig =
            serde_json::from_str(r#"{"endpoint":"https://mirror.example.com/stations.json"}"#)
                .unwrap();
        assert_eq!(
            config.endpoint.as_str(),
            "https://mirror.example.com/stations.json"
        );

        let defaulted: FeedConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, FeedConfig::default());
    }

    #[test]
    fn test_config_deserialize_validates_endpoint() {
        let err = serde_json::from_str::<FeedConfig>(r#"{"endpoint":"file:///etc/passwd"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid scheme 'file'"));
    }
}
