//! Client-side route table and navigation history.
//!
//! A static table maps seven path patterns to page-level views. Patterns
//! are compared segment by segment; a `:id` segment captures the raw path
//! segment as an opaque string parameter. Navigation keeps a single
//! current path with back/forward history, browser style.

/// Page-level views the router can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Novel,
    Chapter,
    Anime,
    Episode,
    Wiki,
    Character,
}

/// One entry in the static route table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Path pattern; a `:id` segment marks a captured parameter.
    pub pattern: &'static str,
    /// View selected when the pattern matches.
    pub view: View,
}

/// The route table. Immutable data; first match wins.
pub const ROUTES: [Route; 7] = [
    Route { pattern: "/", view: View::Home },
    Route { pattern: "/novel", view: View::Novel },
    Route { pattern: "/novel/chapter/:id", view: View::Chapter },
    Route { pattern: "/anime", view: View::Anime },
    Route { pattern: "/anime/episode/:id", view: View::Episode },
    Route { pattern: "/wiki", view: View::Wiki },
    Route { pattern: "/wiki/character/:id", view: View::Character },
];

/// A resolved route: the view to render and its captured parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: View,
    /// Trailing `:id` segment, forwarded to the view unvalidated.
    pub param: Option<String>,
}

/// Resolves a path against the route table.
///
/// Tolerates a trailing slash; returns `None` for unknown paths.
pub fn match_path(path: &str) -> Option<RouteMatch> {
    let segments = split_segments(path);
    ROUTES.iter().find_map(|route| try_match(route, &segments))
}

/// Splits a path into non-empty segments ("/" yields none).
fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Matches one route against pre-split path segments.
fn try_match(route: &Route, segments: &[&str]) -> Option<RouteMatch> {
    let pattern_segments = split_segments(route.pattern);
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut param = None;
    for (pattern, segment) in pattern_segments.iter().zip(segments) {
        if let Some(name) = pattern.strip_prefix(':') {
            debug_assert_eq!(name, "id");
            param = Some(segment.to_string());
        } else if pattern != segment {
            return None;
        }
    }

    Some(RouteMatch {
        view: route.view,
        param,
    })
}

/// Client-side navigation state: one current path plus history stacks.
#[derive(Debug)]
pub struct Router {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router positioned at the home route.
    pub fn new() -> Self {
        Self {
            current: "/".to_string(),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// Returns the current path.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Resolves the current path against the route table.
    pub fn current_match(&self) -> Option<RouteMatch> {
        match_path(&self.current)
    }

    /// Navigates to `path`, pushing a history entry.
    ///
    /// Unknown paths are rejected without touching the history. Any
    /// forward entries are discarded, as with a browser address bar.
    pub fn navigate(&mut self, path: &str) -> Option<RouteMatch> {
        let matched = match_path(path)?;
        self.back
            .push(std::mem::replace(&mut self.current, path.to_string()));
        self.forward.clear();
        Some(matched)
    }

    /// Steps back in history. Returns `None` at the start of history.
    pub fn back(&mut self) -> Option<RouteMatch> {
        let previous = self.back.pop()?;
        self.forward
            .push(std::mem::replace(&mut self.current, previous));
        self.current_match()
    }

    /// Steps forward in history. Returns `None` at the end of history.
    pub fn forward(&mut self) -> Option<RouteMatch> {
        let next = self.forward.pop()?;
        self.back
            .push(std::mem::replace(&mut self.current, next));
        self.current_match()
    }
}
