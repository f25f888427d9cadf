use recipe_browser::app::{self, View};
use recipe_browser::{BrowserConfig, GuardDecision, Location, Router};
use std::sync::{Arc, Mutex};

fn router() -> Router<View> {
    app::app_router(&BrowserConfig::default()).unwrap()
}

/// Records every pending route the global guards see.
fn record_pending(router: &mut Router<View>) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    router.before_each(move |to, _| {
        record.lock().unwrap().push(to.full_path());
        GuardDecision::Proceed
    });
    seen
}

#[test]
fn test_search_without_query_gets_empty_query() {
    let mut router = router();
    let seen = record_pending(&mut router);

    let resolved = router.push_href("/search").unwrap();

    assert_eq!(resolved.view, View::Search);
    assert_eq!(resolved.query_value("query"), Some(""));
    assert_eq!(resolved.query.len(), 1);
    assert_eq!(resolved.full_path(), "/search?query=");
    // The redirect went back through the global guards
    assert_eq!(*seen.lock().unwrap(), vec!["/search", "/search?query="]);
}

#[test]
fn test_search_with_q_is_not_rewritten() {
    let mut router = router();
    let seen = record_pending(&mut router);

    let resolved = router.push_href("/search?q=pasta").unwrap();

    assert_eq!(resolved.query_value("q"), Some("pasta"));
    assert_eq!(resolved.query_value("query"), None);
    assert_eq!(*seen.lock().unwrap(), vec!["/search?q=pasta"]);
}

#[test]
fn test_search_with_query_is_not_rewritten() {
    let mut router = router();
    let seen = record_pending(&mut router);

    let resolved = router.push_href("/search?query=soup").unwrap();

    assert_eq!(resolved.query_value("query"), Some("soup"));
    assert_eq!(resolved.query.len(), 1);
    assert_eq!(*seen.lock().unwrap(), vec!["/search?query=soup"]);
}

#[test]
fn test_search_with_empty_q_counts_as_present() {
    let mut router = router();
    let resolved = router.push_href("/search?q=").unwrap();

    assert_eq!(resolved.full_path(), "/search?q=");
}

#[test]
fn test_search_redirect_drops_unrelated_parameters() {
    let mut router = router();
    let resolved = router.push_href("/search?page=2").unwrap();

    assert_eq!(resolved.query_value("page"), None);
    assert_eq!(resolved.query_value("query"), Some(""));
}

#[test]
fn test_search_guard_applies_within_search() {
    let mut router = router();
    router.push_href("/search?q=pasta").unwrap();

    let resolved = router.push(Location::new("/search")).unwrap();
    assert_eq!(resolved.query_value("query"), Some(""));
    assert_eq!(router.history().len(), 2);
}

#[test]
fn test_other_routes_are_unguarded() {
    let mut router = router();
    let resolved = router.push_href("/recipe/38").unwrap();

    assert!(resolved.query.is_empty());
    assert_eq!(resolved.full_path(), "/recipe/38");
}
