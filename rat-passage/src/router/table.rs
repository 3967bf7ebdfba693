//! Static route table: ordered pattern entries plus one mandatory fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result, ViewError};
use crate::location::Location;

use super::pattern::PathPattern;

/// Builds a view from a matched route.
pub type ViewFactory<V> = Arc<dyn Fn(&RouteMatch) -> std::result::Result<V, ViewError> + Send + Sync>;

/// A location matched against the table, with extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    location: Location,
    pattern: Option<String>,
    params: HashMap<String, String>,
    entry: usize,
}

impl RouteMatch {
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The pattern that matched, or `None` for the fallback entry.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn is_fallback(&self) -> bool {
        self.pattern.is_none()
    }
}

/// Outcome of looking a location up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    /// No pattern matched; the fallback entry serves the location.
    NotFound(RouteMatch),
}

impl Resolution {
    pub fn route_match(&self) -> &RouteMatch {
        match self {
            Self::Matched(m) | Self::NotFound(m) => m,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// One entry of the table.
pub struct RouteEntry<V> {
    pattern: Option<PathPattern>,
    factory: ViewFactory<V>,
}

impl<V> RouteEntry<V> {
    /// A regular entry served when `pattern` matches.
    pub fn new<F>(pattern: &str, factory: F) -> Result<Self>
    where
        F: Fn(&RouteMatch) -> std::result::Result<V, ViewError> + Send + Sync + 'static,
    {
        Ok(Self {
            pattern: Some(PathPattern::parse(pattern)?),
            factory: Arc::new(factory),
        })
    }

    /// The not-found entry.
    pub fn fallback<F>(factory: F) -> Self
    where
        F: Fn(&RouteMatch) -> std::result::Result<V, ViewError> + Send + Sync + 'static,
    {
        Self {
            pattern: None,
            factory: Arc::new(factory),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn pattern(&self) -> Option<&PathPattern> {
        self.pattern.as_ref()
    }
}

impl<V> Clone for RouteEntry<V> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<V> fmt::Debug for RouteEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("fallback", &self.is_fallback())
            .finish()
    }
}

/// Ordered routes, first match wins. Immutable once built.
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
    fallback: RouteEntry<V>,
}

impl<V> RouteTable<V> {
    /// Build a table from entries in priority order. Exactly one entry must be
    /// a fallback; its position does not matter.
    pub fn new(entries: impl IntoIterator<Item = RouteEntry<V>>) -> Result<Self> {
        let mut routes = Vec::new();
        let mut fallback = None;

        for entry in entries {
            if entry.is_fallback() {
                if fallback.is_some() {
                    return Err(Error::DuplicateFallback);
                }
                fallback = Some(entry);
            } else {
                routes.push(entry);
            }
        }

        Ok(Self {
            entries: routes,
            fallback: fallback.ok_or(Error::MissingFallback)?,
        })
    }

    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// Look a location up. Never fails: unmatched locations resolve to the fallback.
    pub fn resolve(&self, location: &Location) -> Resolution {
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(pattern) = &entry.pattern else { continue };
            if let Some(params) = pattern.matches(location) {
                return Resolution::Matched(RouteMatch {
                    location: location.clone(),
                    pattern: Some(pattern.as_str().to_string()),
                    params,
                    entry: index,
                });
            }
        }

        Resolution::NotFound(RouteMatch {
            location: location.clone(),
            pattern: None,
            params: HashMap::new(),
            entry: self.entries.len(),
        })
    }

    /// Run the factory for a resolution.
    pub fn instantiate(&self, resolution: &Resolution) -> Result<V> {
        let route_match = resolution.route_match();
        let entry = self.entries.get(route_match.entry).unwrap_or(&self.fallback);
        (entry.factory)(route_match).map_err(|source| Error::RenderFailure {
            location: route_match.location.clone(),
            source,
        })
    }

    /// Number of non-fallback entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.entries)
            .finish()
    }
}

/// Chained construction; the first error is reported by `build`.
pub struct RouteTableBuilder<V> {
    entries: Vec<RouteEntry<V>>,
    error: Option<Error>,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
        }
    }
}

impl<V> RouteTableBuilder<V> {
    pub fn route<F>(mut self, pattern: &str, factory: F) -> Self
    where
        F: Fn(&RouteMatch) -> std::result::Result<V, ViewError> + Send + Sync + 'static,
    {
        match RouteEntry::new(pattern, factory) {
            Ok(entry) => self.entries.push(entry),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    pub fn fallback<F>(mut self, factory: F) -> Self
    where
        F: Fn(&RouteMatch) -> std::result::Result<V, ViewError> + Send + Sync + 'static,
    {
        self.entries.push(RouteEntry::fallback(factory));
        self
    }

    pub fn build(self) -> Result<RouteTable<V>> {
        if let Some(e) = self.error {
            return Err(e);
        }
        RouteTable::new(self.entries)
    }
}
