use log::debug;

use super::{PathPattern, Route, RouteRecord, Router};
use crate::config::RouterConfig;
use crate::error::NavigationError;

/// Builder for the route table and navigation settings
pub struct RouterBuilder<V> {
    routes: Vec<Route<V>>,
    max_redirect_depth: usize,
}

impl<V> Default for RouterBuilder<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            max_redirect_depth: RouterConfig::default().max_redirect_depth,
        }
    }
}

impl<V> RouterBuilder<V> {
    /// Register a route. Routes are matched in registration order.
    ///
    /// # Example
    /// ```
    /// use recipe_browser::{Route, Router};
    ///
    /// let builder = Router::builder()
    ///     .route(Route::new("/", "Home", "home"))
    ///     .route(Route::new("/recipe/:id", "Recipe", "recipe"));
    /// ```
    pub fn route(mut self, route: Route<V>) -> Self {
        self.routes.push(route);
        self
    }

    /// Register several routes at once, keeping their order.
    pub fn routes(mut self, routes: impl IntoIterator<Item = Route<V>>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Set how many guard redirects a single navigation may follow
    ///
    /// # Example
    /// ```
    /// use recipe_browser::{Route, Router};
    ///
    /// let builder = Router::builder()
    ///     .route(Route::new("/", "Home", "home"))
    ///     .max_redirect_depth(3);
    /// ```
    pub fn max_redirect_depth(mut self, depth: usize) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    /// Apply the `[router]` configuration section.
    pub fn config(self, config: &RouterConfig) -> Self {
        self.max_redirect_depth(config.max_redirect_depth)
    }

    /// Validate the route table and build the router
    ///
    /// # Errors
    /// Returns `NavigationError` if:
    /// - A path pattern is malformed
    /// - Two routes share a name
    /// - Two patterns match the same set of paths
    /// - The redirect depth is zero
    ///
    /// # Example
    /// ```
    /// # use recipe_browser::{Location, NavigationError, Route, Router};
    /// # fn main() -> Result<(), NavigationError> {
    /// let router = Router::builder()
    ///     .route(Route::new("/", "Home", "home"))
    ///     .route(Route::new("/recipe/:id", "Recipe", "recipe"))
    ///     .build()?;
    ///
    /// let resolved = router.resolve(&Location::new("/recipe/38"))?;
    /// assert_eq!(resolved.name, "Recipe");
    /// assert_eq!(resolved.param("id"), Some("38"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Router<V>, NavigationError> {
        if self.max_redirect_depth == 0 {
            return Err(NavigationError::InvalidRedirectDepth(0));
        }

        let mut records: Vec<RouteRecord<V>> = Vec::with_capacity(self.routes.len());

        for route in self.routes {
            let pattern = PathPattern::parse(&route.path)?;

            if records.iter().any(|record| record.route.name == route.name) {
                return Err(NavigationError::DuplicateName(route.name));
            }
            if let Some(existing) = records
                .iter()
                .find(|record| record.pattern.same_shape(&pattern))
            {
                return Err(NavigationError::DuplicatePath(format!(
                    "'{}' overlaps '{}'",
                    route.path,
                    existing.pattern.as_str()
                )));
            }

            debug!("Registered route '{}' at {}", route.name, route.path);
            records.push(RouteRecord { route, pattern });
        }

        Ok(Router::from_records(records, self.max_redirect_depth))
    }
}
