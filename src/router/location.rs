use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::NavigationError;

/// Characters escaped inside a query key or value.
pub(crate) const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Query parameters of a location. Keys are unique and kept sorted.
pub type Query = BTreeMap<String, String>;

/// A navigation request: an in-app path plus its query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Query,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Query::new(),
        }
    }

    /// Add or overwrite a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Parse an href such as `/search?q=pasta%20bake#results`.
    ///
    /// The fragment is dropped. Query keys and values are percent-decoded with
    /// `+` read as a space; a repeated key keeps its last value.
    pub fn parse(href: &str) -> Result<Self, NavigationError> {
        let href = href.trim();
        let without_fragment = href.split_once('#').map_or(href, |(head, _)| head);
        let (path, raw_query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        if !path.starts_with('/') {
            return Err(NavigationError::InvalidLocation(format!(
                "'{}' is not an absolute in-app path",
                href
            )));
        }

        let mut query = Query::new();
        for pair in raw_query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            query.insert(decode_component(key), decode_component(value));
        }

        Ok(Self {
            path: path.to_string(),
            query,
        })
    }

    /// Path followed by the encoded query string, if any.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(value, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<String>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::new(path)
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
