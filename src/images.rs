//! Cache busting for recipe image URLs.
//!
//! Recipe images are served from long-lived CDN paths, so the browser keeps
//! showing a stale picture after the data source replaces one. Appending a
//! per-session token as a query parameter forces a fresh fetch.

use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::ImageConfig;
use crate::router::location::QUERY_COMPONENT;

/// Appends a cache parameter to image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheBuster {
    param: String,
    token: String,
}

impl CacheBuster {
    pub fn new(param: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            token: token.into(),
        }
    }

    /// Use the configured parameter name with an explicit token.
    pub fn from_config(config: &ImageConfig, token: impl Into<String>) -> Self {
        Self::new(config.cache_param.clone(), token)
    }

    /// Use the configured parameter name with the current time in milliseconds
    /// as the token, so each session fetches images once.
    pub fn for_session(config: &ImageConfig) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self::from_config(config, millis.to_string())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Return `url` with exactly one cache parameter set to this token.
    ///
    /// An existing value for the parameter is replaced; other query pairs and
    /// the fragment are kept in place. Empty URLs are returned unchanged.
    pub fn apply(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }

        let (without_fragment, fragment) = match url.split_once('#') {
            Some((head, frag)) => (head, Some(frag)),
            None => (url, None),
        };
        let (base, query) = match without_fragment.split_once('?') {
            Some((base, query)) => (base, query),
            None => (without_fragment, ""),
        };

        let busting = format!(
            "{}={}",
            utf8_percent_encode(&self.param, QUERY_COMPONENT),
            utf8_percent_encode(&self.token, QUERY_COMPONENT)
        );
        let mut pairs: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| {
                let key = pair.split_once('=').map_or(*pair, |(k, _)| k);
                percent_decode_str(key).decode_utf8_lossy() != self.param
            })
            .collect();

        pairs.push(&busting);

        let mut out = format!("{}?{}", base, pairs.join("&"));
        if let Some(fragment) = fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buster() -> CacheBuster {
        CacheBuster::new("v", "1700000000000")
    }

    #[test]
    fn test_plain_url_gets_parameter() {
        assert_eq!(
            buster().apply("https://img.example.com/38/a.jpg"),
            "https://img.example.com/38/a.jpg?v=1700000000000"
        );
    }

    #[test]
    fn test_existing_query_is_preserved() {
        assert_eq!(
            buster().apply("https://img.example.com/a.jpg?w=640&h=480"),
            "https://img.example.com/a.jpg?w=640&h=480&v=1700000000000"
        );
    }

    #[test]
    fn test_previous_token_is_replaced() {
        let once = buster().apply("https://img.example.com/a.jpg?v=old&w=640");
        assert_eq!(once, "https://img.example.com/a.jpg?w=640&v=1700000000000");

        // Applying twice does not stack parameters
        assert_eq!(buster().apply(&once), once);
    }

    #[test]
    fn test_fragment_stays_last() {
        assert_eq!(
            buster().apply("/static/a.jpg#crop"),
            "/static/a.jpg?v=1700000000000#crop"
        );
    }

    #[test]
    fn test_empty_url_unchanged() {
        assert_eq!(buster().apply(""), "");
    }

    #[test]
    fn test_token_is_encoded() {
        let buster = CacheBuster::new("v", "a b&c");
        assert_eq!(buster.apply("/a.jpg"), "/a.jpg?v=a%20b%26c");
    }

    #[test]
    fn test_session_token_is_numeric() {
        let buster = CacheBuster::for_session(&ImageConfig::default());
        assert!(!buster.token().is_empty());
        assert!(buster.token().chars().all(|c| c.is_ascii_digit()));
    }
}
