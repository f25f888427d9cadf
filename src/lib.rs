//! Client-side navigation for the recipe browser.
//!
//! The crate resolves in-app locations to the browser's pages, runs them
//! through global and per-route guards, keeps a session history and drives a
//! navigation progress bar. It also carries the recipe value types the pages
//! receive from the data source.
//!
//! ```
//! use recipe_browser::{app, app::View, BrowserConfig, NavigationError};
//!
//! let mut router = app::app_router(&BrowserConfig::default()).unwrap();
//!
//! let recipe = router.push_href("/recipe/38").unwrap();
//! assert_eq!(recipe.view, View::Recipe);
//! assert_eq!(recipe.param("id"), Some("38"));
//!
//! assert!(matches!(
//!     router.push_href("/no-such-page"),
//!     Err(NavigationError::RouteNotFound { .. })
//! ));
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod progress;
pub mod router;

pub use config::BrowserConfig;
pub use error::NavigationError;
pub use images::CacheBuster;
pub use model::{Ingredient, NutritionFacts, RecipeDetail, RecipeSummary, RecipeTiming};
pub use progress::{ProgressBar, ProgressIndicator};
pub use router::{
    Guard, GuardDecision, History, Location, NavigationOutcome, Params, Query, ResolvedRoute,
    Route, Router, RouterBuilder,
};

