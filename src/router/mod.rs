//! Client-side navigation controller.
//!
//! A [`Router`] owns a fixed route table, resolves locations against it in
//! registration order and runs every navigation through the same pipeline:
//!
//! 1. resolve the requested location (unknown paths fail before any hook runs)
//! 2. run the global guards in registration order, then the entry guard of the
//!    pending route; a redirect re-enters step 1 with the new location
//! 3. commit the route as current and record it in the session history
//! 4. run the after hooks, which also run when step 2 ends in a failure

mod builder;
mod guard;
mod history;
pub(crate) mod location;
mod pattern;
mod route;

pub use builder::RouterBuilder;
pub use guard::{Guard, GuardDecision};
pub use history::History;
pub use location::{Location, Query};
pub use pattern::{Params, PathPattern};
pub use route::{ResolvedRoute, Route};

use log::{debug, info, warn};

use crate::error::NavigationError;

type AfterHook<V> = Box<dyn Fn(&NavigationOutcome<'_, V>) + Send + Sync>;

/// How a settled navigation ended, as seen by after hooks.
#[derive(Debug)]
pub enum NavigationOutcome<'a, V> {
    /// The route is now current
    Committed(&'a ResolvedRoute<V>),
    /// The navigation stopped; `to` is the last pending route
    Failed {
        to: &'a ResolvedRoute<V>,
        error: &'a NavigationError,
    },
}

impl<'a, V> NavigationOutcome<'a, V> {
    /// The committed route, or the last pending one on failure.
    pub fn route(&self) -> &'a ResolvedRoute<V> {
        match *self {
            NavigationOutcome::Committed(route) => route,
            NavigationOutcome::Failed { to, .. } => to,
        }
    }

    /// Whether the navigation ended on a new current route.
    pub fn is_committed(&self) -> bool {
        matches!(self, NavigationOutcome::Committed(_))
    }

    /// Why the navigation failed, if it did.
    pub fn error(&self) -> Option<&'a NavigationError> {
        match *self {
            NavigationOutcome::Committed(_) => None,
            NavigationOutcome::Failed { error, .. } => Some(error),
        }
    }
}

pub(crate) struct RouteRecord<V> {
    route: Route<V>,
    pattern: PathPattern,
}

#[derive(Debug, Clone, Copy)]
enum HistoryMode {
    Push,
    Replace,
    Traverse(usize),
}

/// The navigation controller.
pub struct Router<V> {
    records: Vec<RouteRecord<V>>,
    before_hooks: Vec<Box<dyn Guard<V>>>,
    after_hooks: Vec<AfterHook<V>>,
    current: Option<ResolvedRoute<V>>,
    history: History,
    max_redirect_depth: usize,
}

impl<V> Router<V> {
    /// Creates a new builder for the route table
    pub fn builder() -> RouterBuilder<V> {
        RouterBuilder::default()
    }

    fn from_records(records: Vec<RouteRecord<V>>, max_redirect_depth: usize) -> Self {
        Self {
            records,
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
            current: None,
            history: History::new(),
            max_redirect_depth,
        }
    }

    /// Registered routes, in matching order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<V>> {
        self.records.iter().map(|record| &record.route)
    }

    pub fn route_count(&self) -> usize {
        self.records.len()
    }

    pub fn max_redirect_depth(&self) -> usize {
        self.max_redirect_depth
    }

    /// The active route, if any navigation has committed.
    pub fn current(&self) -> Option<&ResolvedRoute<V>> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Register a global guard. Guards run in registration order before the
    /// pending route's own entry guard.
    pub fn add_guard<G>(&mut self, guard: G)
    where
        G: Guard<V> + 'static,
    {
        self.before_hooks.push(Box::new(guard));
    }

    /// Closure form of [`Router::add_guard`].
    pub fn before_each<F>(&mut self, hook: F)
    where
        F: Fn(&ResolvedRoute<V>, Option<&ResolvedRoute<V>>) -> GuardDecision + Send + Sync + 'static,
    {
        self.add_guard(hook);
    }

    /// Register a hook that runs once every navigation that reached the guards
    /// has settled, whether it committed or not.
    pub fn after_each<F>(&mut self, hook: F)
    where
        F: Fn(&NavigationOutcome<'_, V>) + Send + Sync + 'static,
    {
        self.after_hooks.push(Box::new(hook));
    }

    fn record(&self, name: &str) -> Option<&RouteRecord<V>> {
        self.records.iter().find(|record| record.route.name == name)
    }
}

impl<V: Clone> Router<V> {
    /// Match a location against the route table; first match wins.
    pub fn resolve(&self, location: &Location) -> Result<ResolvedRoute<V>, NavigationError> {
        self.records
            .iter()
            .find_map(|record| {
                let params = record.pattern.matches(&location.path)?;
                Some(resolved(
                    record,
                    location.path.clone(),
                    params,
                    location.query.clone(),
                ))
            })
            .ok_or_else(|| NavigationError::RouteNotFound {
                path: location.path.clone(),
            })
    }

    /// Resolve a route by name, filling its path parameters.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &Params,
        query: Query,
    ) -> Result<ResolvedRoute<V>, NavigationError> {
        let record = self
            .record(name)
            .ok_or_else(|| NavigationError::UnknownRouteName(name.to_string()))?;

        let path = record
            .pattern
            .build(params)
            .map_err(|param| NavigationError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        let params = record
            .pattern
            .param_names()
            .filter_map(|key| params.get(key).map(|value| (key.to_string(), value.clone())))
            .collect();

        Ok(resolved(record, path, params, query))
    }

    /// Full path (with query) of a named route.
    pub fn href(&self, name: &str, params: &Params, query: Query) -> Result<String, NavigationError> {
        self.resolve_named(name, params, query)
            .map(|route| route.full_path())
    }

    /// Navigate to `location`, appending it to the history on commit.
    pub fn push(&mut self, location: Location) -> Result<ResolvedRoute<V>, NavigationError> {
        self.navigate(location, HistoryMode::Push)
    }

    /// Parse an href and navigate to it.
    pub fn push_href(&mut self, href: &str) -> Result<ResolvedRoute<V>, NavigationError> {
        let location = Location::parse(href)?;
        self.push(location)
    }

    /// Navigate to `location`, overwriting the current history entry on commit.
    pub fn replace(&mut self, location: Location) -> Result<ResolvedRoute<V>, NavigationError> {
        self.navigate(location, HistoryMode::Replace)
    }

    /// Navigate to the previous history entry.
    pub fn back(&mut self) -> Result<ResolvedRoute<V>, NavigationError> {
        let index = self
            .history
            .back_index()
            .ok_or(NavigationError::NoHistoryEntry("previous"))?;
        self.traverse(index)
    }

    /// Navigate to the next history entry.
    pub fn forward(&mut self) -> Result<ResolvedRoute<V>, NavigationError> {
        let index = self
            .history
            .forward_index()
            .ok_or(NavigationError::NoHistoryEntry("next"))?;
        self.traverse(index)
    }

    fn traverse(&mut self, index: usize) -> Result<ResolvedRoute<V>, NavigationError> {
        let location = self
            .history
            .get(index)
            .cloned()
            .ok_or(NavigationError::NoHistoryEntry("requested"))?;
        self.navigate(location, HistoryMode::Traverse(index))
    }

    fn navigate(
        &mut self,
        target: Location,
        mode: HistoryMode,
    ) -> Result<ResolvedRoute<V>, NavigationError> {
        let mut to = self.resolve(&target).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        debug!("Navigation to {} started", to.full_path());

        let mut redirects = 0;
        let settled = loop {
            match self.run_guards(&to) {
                GuardDecision::Proceed => break Ok(()),
                GuardDecision::Abort => {
                    info!("Navigation to {} aborted by a guard", to.full_path());
                    break Err(NavigationError::Aborted {
                        path: to.full_path(),
                    });
                }
                GuardDecision::Redirect(next) => {
                    redirects += 1;
                    if redirects > self.max_redirect_depth {
                        warn!(
                            "Giving up on {} after {} redirects",
                            next.full_path(),
                            self.max_redirect_depth
                        );
                        break Err(NavigationError::RedirectLoop {
                            path: next.full_path(),
                            depth: self.max_redirect_depth,
                        });
                    }

                    debug!("Redirecting {} to {}", to.full_path(), next.full_path());
                    match self.resolve(&next) {
                        Ok(route) => to = route,
                        Err(e) => {
                            warn!("Redirect target unavailable: {}", e);
                            break Err(e);
                        }
                    }
                }
            }
        };

        match settled {
            Ok(()) => {
                self.commit(&to, mode);
                info!("Navigated to {} ({})", to.full_path(), to.name);
                self.run_after_hooks(&NavigationOutcome::Committed(&to));
                Ok(to)
            }
            Err(error) => {
                self.run_after_hooks(&NavigationOutcome::Failed {
                    to: &to,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    fn run_guards(&self, to: &ResolvedRoute<V>) -> GuardDecision {
        let from = self.current.as_ref();

        for hook in &self.before_hooks {
            let decision = hook.check(to, from);
            if decision != GuardDecision::Proceed {
                return decision;
            }
        }

        match self.record(&to.name).and_then(|record| record.route.guard.as_ref()) {
            Some(guard) => guard.check(to, from),
            None => GuardDecision::Proceed,
        }
    }

    fn run_after_hooks(&self, outcome: &NavigationOutcome<'_, V>) {
        for hook in &self.after_hooks {
            hook(outcome);
        }
    }

    fn commit(&mut self, to: &ResolvedRoute<V>, mode: HistoryMode) {
        let location = to.location();
        match mode {
            HistoryMode::Push => self.history.push(location),
            HistoryMode::Replace => self.history.replace(location),
            HistoryMode::Traverse(index) => self.history.traverse(index, location),
        }
        self.current = Some(to.clone());
    }
}

fn resolved<V: Clone>(
    record: &RouteRecord<V>,
    path: String,
    params: Params,
    query: Query,
) -> ResolvedRoute<V> {
    ResolvedRoute {
        name: record.route.name.clone(),
        view: record.route.view.clone(),
        pattern: record.pattern.as_str().to_string(),
        path,
        params,
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn router() -> Router<&'static str> {
        Router::builder()
            .route(Route::new("/", "Home", "home"))
            .route(Route::new("/recipe/new", "NewRecipe", "new-recipe"))
            .route(Route::new("/recipe/:id", "Recipe", "recipe"))
            .route(Route::new("/login", "Login", "login"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let router = router();
        assert_eq!(router.resolve(&Location::new("/recipe/new")).unwrap().name, "NewRecipe");
        assert_eq!(router.resolve(&Location::new("/recipe/38")).unwrap().name, "Recipe");
    }

    #[test]
    fn test_resolve_keeps_query() {
        let router = router();
        let location = Location::new("/recipe/38").with_query("tab", "nutrition");
        let resolved = router.resolve(&location).unwrap();
        assert_eq!(resolved.query_value("tab"), Some("nutrition"));
        assert_eq!(resolved.full_path(), "/recipe/38?tab=nutrition");
    }

    #[test]
    fn test_href_for_named_route() {
        let router = router();
        let mut params = Params::new();
        params.insert("id".to_string(), "38".to_string());
        let query = Query::from([("tab".to_string(), "reviews".to_string())]);

        assert_eq!(router.href("Recipe", &params, query).unwrap(), "/recipe/38?tab=reviews");
        assert!(matches!(
            router.href("Recipe", &Params::new(), Query::new()),
            Err(NavigationError::MissingParam { .. })
        ));
        assert!(matches!(
            router.href("Nope", &params, Query::new()),
            Err(NavigationError::UnknownRouteName(_))
        ));
    }

    #[test]
    fn test_global_guards_short_circuit() {
        let mut router = router();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&calls);
        router.before_each(move |to, _| {
            first.lock().unwrap().push("first");
            if to.name == "Recipe" {
                GuardDecision::Abort
            } else {
                GuardDecision::Proceed
            }
        });
        let second = Arc::clone(&calls);
        router.before_each(move |_, _| {
            second.lock().unwrap().push("second");
            GuardDecision::Proceed
        });

        router.push(Location::new("/")).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);

        calls.lock().unwrap().clear();
        let result = router.push(Location::new("/recipe/38"));
        assert!(matches!(result, Err(NavigationError::Aborted { .. })));
        assert_eq!(*calls.lock().unwrap(), vec!["first"]);
        // Aborted navigation leaves the previous view active
        assert_eq!(router.current().unwrap().name, "Home");
    }

    #[test]
    fn test_guard_sees_current_route_as_from() {
        let mut router = router();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        router.before_each(move |_, from| {
            record.lock().unwrap().push(from.map(|route| route.name.clone()));
            GuardDecision::Proceed
        });

        router.push(Location::new("/")).unwrap();
        router.push(Location::new("/login")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![None, Some("Home".to_string())]);
    }

    #[test]
    fn test_route_guard_runs_after_global_guards() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let route_order = Arc::clone(&order);
        let mut router = Router::builder()
            .route(Route::new("/", "Home", "home"))
            .route(Route::new("/login", "Login", "login").before_enter(move |_, _| {
                route_order.lock().unwrap().push("route");
                GuardDecision::Proceed
            }))
            .build()
            .unwrap();
        let global_order = Arc::clone(&order);
        router.before_each(move |_, _| {
            global_order.lock().unwrap().push("global");
            GuardDecision::Proceed
        });

        router.push(Location::new("/")).unwrap();
        router.push(Location::new("/login")).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["global", "global", "route"]);
    }

    #[test]
    fn test_redirect_reenters_resolution() {
        let mut router = router();
        router.before_each(|to, _| {
            if to.name == "NewRecipe" {
                GuardDecision::Redirect(Location::new("/login"))
            } else {
                GuardDecision::Proceed
            }
        });

        let committed = router.push(Location::new("/recipe/new")).unwrap();
        assert_eq!(committed.name, "Login");
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.history().current().unwrap().path, "/login");
    }

    #[test]
    fn test_redirect_to_unknown_path_fails() {
        let mut router = router();
        router.before_each(|to, _| {
            if to.name == "Login" {
                GuardDecision::Redirect(Location::new("/gone"))
            } else {
                GuardDecision::Proceed
            }
        });

        let result = router.push(Location::new("/login"));
        assert!(matches!(result, Err(NavigationError::RouteNotFound { path }) if path == "/gone"));
        assert!(router.current().is_none());
    }

    #[test]
    fn test_after_hooks_see_outcome() {
        let mut router = router();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&outcomes);
        router.after_each(move |outcome| {
            record
                .lock()
                .unwrap()
                .push((outcome.route().name.clone(), outcome.is_committed()));
        });
        router.before_each(|to, _| {
            if to.name == "Login" {
                GuardDecision::Abort
            } else {
                GuardDecision::Proceed
            }
        });

        router.push(Location::new("/")).unwrap();
        let _ = router.push(Location::new("/login"));
        // Unknown paths fail before any hook runs
        let _ = router.push(Location::new("/missing"));

        assert_eq!(
            *outcomes.lock().unwrap(),
            vec![("Home".to_string(), true), ("Login".to_string(), false)]
        );
    }

    #[test]
    fn test_replace_overwrites_current_entry() {
        let mut router = router();
        router.push(Location::new("/")).unwrap();
        router.replace(Location::new("/login")).unwrap();

        assert_eq!(router.history().len(), 1);
        assert_eq!(router.current().unwrap().name, "Login");
    }

    #[test]
    fn test_push_href_rejects_relative() {
        let mut router = router();
        assert!(matches!(
            router.push_href("recipe/38"),
            Err(NavigationError::InvalidLocation(_))
        ));
    }
}
