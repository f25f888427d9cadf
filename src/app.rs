//! The recipe browser's route table.

use serde::Serialize;
use std::sync::Arc;

use crate::config::BrowserConfig;
use crate::error::NavigationError;
use crate::progress::{self, ProgressIndicator};
use crate::router::{Guard, GuardDecision, Location, ResolvedRoute, Route, Router};

pub const HOME: &str = "Home";
pub const REGISTER: &str = "Register";
pub const RECIPE: &str = "Recipe";
pub const SEARCH: &str = "Search";

/// Pages of the recipe browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Register,
    Recipe,
    Search,
}

/// Entry guard of the search page.
///
/// The search page expects a search term under `query` or `q`. When neither
/// key is present the navigation is redirected to the same path with an empty
/// `query`, dropping any other parameters. A key that is present with an empty
/// value counts as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchQueryGuard;

impl SearchQueryGuard {
    pub const QUERY: &'static str = "query";
    pub const SHORT_QUERY: &'static str = "q";
}

impl<V> Guard<V> for SearchQueryGuard {
    fn check(&self, to: &ResolvedRoute<V>, _from: Option<&ResolvedRoute<V>>) -> GuardDecision {
        if to.query.contains_key(Self::QUERY) || to.query.contains_key(Self::SHORT_QUERY) {
            GuardDecision::Proceed
        } else {
            GuardDecision::Redirect(Location::new(to.path.clone()).with_query(Self::QUERY, ""))
        }
    }
}

/// The four routes, in matching order.
pub fn routes() -> Vec<Route<View>> {
    vec![
        Route::new("/", HOME, View::Home),
        Route::new("/register", REGISTER, View::Register),
        Route::new("/recipe/:id", RECIPE, View::Recipe),
        Route::new("/search", SEARCH, View::Search).with_guard(SearchQueryGuard),
    ]
}

/// Build the application router without a progress indicator.
pub fn app_router(config: &BrowserConfig) -> Result<Router<View>, NavigationError> {
    Router::builder()
        .routes(routes())
        .config(&config.router)
        .build()
}

/// Build the application router with `indicator` bound to every navigation.
///
/// # Example
/// ```
/// use recipe_browser::{app, BrowserConfig, ProgressBar};
/// use std::sync::Arc;
///
/// let config = BrowserConfig::default();
/// let bar = Arc::new(ProgressBar::new(&config.progress));
/// let mut router = app::app_router_with_progress(&config, Arc::clone(&bar)).unwrap();
///
/// let resolved = router.push_href("/search").unwrap();
/// assert_eq!(resolved.query_value("query"), Some(""));
/// assert!(!bar.is_started());
/// ```
pub fn app_router_with_progress<I>(
    config: &BrowserConfig,
    indicator: Arc<I>,
) -> Result<Router<View>, NavigationError>
where
    I: ProgressIndicator + ?Sized + 'static,
{
    let mut router = app_router(config)?;
    progress::bind(&mut router, indicator);
    Ok(router)
}
