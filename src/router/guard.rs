use super::{Location, ResolvedRoute};

/// What a guard decided about a pending navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation continue to the next guard, then activation
    Proceed,
    /// Replace the pending navigation with another location
    Redirect(Location),
    /// Drop the navigation and stay on the current view
    Abort,
}

/// A hook that can intervene in a pending navigation.
///
/// Global guards are registered with [`Router::add_guard`](super::Router::add_guard)
/// or [`Router::before_each`](super::Router::before_each); route guards with
/// [`Route::with_guard`](super::Route::with_guard) or
/// [`Route::before_enter`](super::Route::before_enter).
pub trait Guard<V>: Send + Sync {
    /// Inspect the pending route `to`; `from` is the active route, if any.
    fn check(&self, to: &ResolvedRoute<V>, from: Option<&ResolvedRoute<V>>) -> GuardDecision;
}

impl<V, F> Guard<V> for F
where
    F: Fn(&ResolvedRoute<V>, Option<&ResolvedRoute<V>>) -> GuardDecision + Send + Sync,
{
    fn check(&self, to: &ResolvedRoute<V>, from: Option<&ResolvedRoute<V>>) -> GuardDecision {
        self(to, from)
    }
}
