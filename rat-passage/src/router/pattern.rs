//! Path patterns used by the route table.
//!
//! Supported syntax:
//! - literal segments: `/admins/list`
//! - named parameters: `/admins/{id}`
//! - a trailing catch-all: `/files/*`
//!
//! Trailing slashes are ignored on both the pattern and the location.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll,
}

/// A compiled route pattern.
#[derive(Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern, rejecting malformed parameter syntax.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut names: Vec<&str> = Vec::new();

        for (i, part) in raw.iter().enumerate() {
            if *part == "*" {
                if i + 1 != raw.len() {
                    return Err(invalid("'*' is only allowed as the last segment"));
                }
                segments.push(Segment::CatchAll);
            } else if let Some(inner) = part.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .ok_or_else(|| invalid("unclosed '{'"))?;
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid("parameter names must be non-empty [A-Za-z0-9_]"));
                }
                if names.contains(&name) {
                    return Err(invalid("duplicate parameter name"));
                }
                names.push(name);
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains('{') || part.contains('}') || part.contains('*') {
                return Err(invalid("parameters must span a whole segment"));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of the parameters in the order they appear.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Match a location, returning the extracted parameters on success.
    pub fn matches(&self, location: &Location) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        let mut parts = location.segments();

        for segment in &self.segments {
            match segment {
                Segment::CatchAll => return Some(params),
                Segment::Literal(lit) => {
                    if parts.next()? != lit.as_str() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.next()?;
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        // Every location segment must be consumed unless a catch-all ended the pattern.
        parts.next().is_none().then_some(params)
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathPattern({:?})", self.source)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(path: &str) -> Location {
        Location::new(path)
    }

    #[test]
    fn test_root_matches_only_root() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.matches(&loc("/")).is_some());
        assert!(pattern.matches(&loc("")).is_some());
        assert!(pattern.matches(&loc("/admins")).is_none());
    }

    #[test]
    fn test_params_extracted() {
        let pattern = PathPattern::parse("/admins/{id}/history").unwrap();
        let params = pattern.matches(&loc("/admins/42/history/")).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(pattern.matches(&loc("/admins/42")).is_none());
        assert!(pattern.matches(&loc("/admins/42/history/extra")).is_none());
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_catch_all() {
        let pattern = PathPattern::parse("/files/*").unwrap();
        assert!(pattern.matches(&loc("/files")).is_some());
        assert!(pattern.matches(&loc("/files/a/b/c")).is_some());
        assert!(pattern.matches(&loc("/other")).is_none());

        let everything = PathPattern::parse("/*").unwrap();
        assert!(everything.matches(&loc("/anything/at/all")).is_some());
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        for bad in ["admins", "/a/{id", "/a/{}", "/a/*/b", "/a/x{id}", "/a/{id}/{id}", "/a/{i-d}"] {
            let err = PathPattern::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidPattern { .. }), "{bad} should be rejected");
        }
    }
}
