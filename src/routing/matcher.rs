//! Route matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive and literal
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: &'static str,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Returns true if `path` starts with the prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix)
    }

    /// Returns the part of `path` after the prefix, if it matches.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.matches(path).then(|| &path[self.prefix.len()..])
    }
}
