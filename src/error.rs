use thiserror::Error;

/// Errors that can occur while building the router or navigating
#[derive(Error, Debug)]
pub enum NavigationError {
    /// No registered pattern matches the requested path
    #[error("No route matches path: {path}")]
    RouteNotFound { path: String },

    /// A guard declined the navigation
    #[error("Navigation to {path} was aborted by a guard")]
    Aborted { path: String },

    /// Guards kept redirecting past the configured depth
    #[error("Redirect chain to {path} exceeded {depth} redirects")]
    RedirectLoop { path: String, depth: usize },

    /// Guard redirects were disabled, so no redirecting guard can settle
    #[error("Redirect depth must be at least 1, got {0}")]
    InvalidRedirectDepth(usize),

    /// A route pattern could not be parsed
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),

    /// Two routes share the same path shape
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two routes share the same name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// No route is registered under this name
    #[error("Unknown route name: {0}")]
    UnknownRouteName(String),

    /// A named route was resolved without one of its path parameters
    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// The href could not be read as an in-app location
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Back/forward was requested past the end of the session history
    #[error("No {0} entry in navigation history")]
    NoHistoryEntry(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl NavigationError {
    /// Whether the failure leaves the current view in place without anything for
    /// the host to render.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            NavigationError::Aborted { .. } | NavigationError::RedirectLoop { .. }
        )
    }
}
