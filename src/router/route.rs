use serde::Serialize;
use std::fmt;

use super::guard::{Guard, GuardDecision};
use super::location::{Location, Query};
use super::pattern::Params;

/// A route definition: a path pattern bound to a view and an optional entry guard.
pub struct Route<V> {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) view: V,
    pub(crate) guard: Option<Box<dyn Guard<V>>>,
}

impl<V> Route<V> {
    /// Create a route. The pattern is validated when the router is built.
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            view,
            guard: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Attach an entry guard. It runs after the global guards, only for
    /// navigations whose pending route is this one.
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Guard<V> + 'static,
    {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Closure form of [`Route::with_guard`].
    pub fn before_enter<F>(self, guard: F) -> Self
    where
        F: Fn(&ResolvedRoute<V>, Option<&ResolvedRoute<V>>) -> GuardDecision + Send + Sync + 'static,
    {
        self.with_guard(guard)
    }
}

impl<V: fmt::Debug> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("view", &self.view)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// The outcome of resolution: which route matched and with what parameters.
///
/// This is what the view layer receives when a navigation commits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute<V> {
    /// Name of the matched route
    pub name: String,
    /// View the route activates
    pub view: V,
    /// Pattern of the matched route, e.g. `/recipe/:id`
    pub pattern: String,
    /// Requested path, e.g. `/recipe/38`
    pub path: String,
    /// Decoded path parameters
    pub params: Params,
    /// Query parameters
    pub query: Query,
}

impl<V> ResolvedRoute<V> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// The location this route was resolved from.
    pub fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            query: self.query.clone(),
        }
    }

    pub fn full_path(&self) -> String {
        self.location().full_path()
    }
}
