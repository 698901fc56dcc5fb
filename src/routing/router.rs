//! Route lookup.
//!
//! # Responsibilities
//! - Store the fixed route table
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins, in table order
//! - Explicit `None` rather than silent default

use crate::routing::matcher::PathPrefixMatcher;

/// The handler a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Generic URL proxy (`/api/<target>`).
    Api,
    /// Reader service proxy (`/jina/<target>`).
    Reader,
    /// PDF text extraction (`/extract-pdf?url=...`).
    ExtractPdf,
}

impl RouteKind {
    /// Label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            RouteKind::Api => "api",
            RouteKind::Reader => "reader",
            RouteKind::ExtractPdf => "extract_pdf",
        }
    }
}

/// A matched route and the path left after its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub kind: RouteKind,
    pub remainder: &'a str,
}

/// Path-prefix router over the fixed route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(PathPrefixMatcher, RouteKind)>,
}

impl Router {
    /// Build the router with the standard route table.
    pub fn new() -> Self {
        Self {
            routes: vec![
                (PathPrefixMatcher::new("/api/"), RouteKind::Api),
                (PathPrefixMatcher::new("/jina/"), RouteKind::Reader),
                (PathPrefixMatcher::new("/extract-pdf"), RouteKind::ExtractPdf),
            ],
        }
    }

    /// Find the route for `path`.
    pub fn match_path<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes.iter().find_map(|(matcher, kind)| {
            matcher.strip(path).map(|remainder| RouteMatch {
                kind: *kind,
                remainder,
            })
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
