use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;

use crate::error::NavigationError;

/// Decoded path parameters, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A route path pattern such as `/recipe/:id`.
///
/// Static segments match literally; `:name` segments match exactly one
/// non-empty segment. A single trailing slash on the requested path is ignored.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, NavigationError> {
        if !raw.starts_with('/') {
            return Err(NavigationError::InvalidPattern(format!(
                "'{}' must start with '/'",
                raw
            )));
        }

        let mut segments = Vec::new();
        for part in split_segments(raw) {
            if part.is_empty() {
                return Err(NavigationError::InvalidPattern(format!(
                    "'{}' contains an empty segment",
                    raw
                )));
            }

            let segment = match part.strip_prefix(':') {
                Some("") => {
                    return Err(NavigationError::InvalidPattern(format!(
                        "'{}' has an unnamed parameter",
                        raw
                    )))
                }
                Some(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(NavigationError::InvalidPattern(format!(
                            "'{}' repeats parameter ':{}'",
                            raw, name
                        )));
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Static(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the path parameters, in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether both patterns match exactly the same set of paths.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match a request path, returning the decoded parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8_lossy().into_owned();
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path from parameters, encoding each value.
    ///
    /// Returns the name of the first missing parameter on failure.
    pub fn build(&self, params: &Params) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| name.clone())?;
                    path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

/// Split a path into segments, ignoring the leading slash and one trailing slash.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.split('/').filter({
        let root = trimmed.is_empty();
        move |_| !root
    })
}
