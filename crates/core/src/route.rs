//! Navigation targets.

use std::fmt;

/// A navigable location inside the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The listing page at `/`.
    Home,
    /// The detail page for one game at `/<id>`.
    Game {
        /// Identifier taken from the path segment.
        id: String,
    },
    /// A path that does not map to any page.
    NotFound(String),
}

impl Route {
    /// Parse a path such as `/`, `/452` or a bare `452`.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let inner = trimmed.trim_start_matches('/').trim_end_matches('/');
        if inner.is_empty() {
            return Route::Home;
        }
        if inner.contains('/') || inner.chars().any(char::is_whitespace) {
            return Route::NotFound(trimmed.to_string());
        }
        Route::Game {
            id: inner.to_string(),
        }
    }

    /// Path form of the route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Game { id } => format!("/{id}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Identifier of the game this route points at, if any.
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Route::Game { id } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
