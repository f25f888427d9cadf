//! Navigation progress indicator.
//!
//! [`ProgressBar`] tracks a fraction in `[0, 1]` for the in-flight navigation,
//! hidden while idle. [`bind`] wires any [`ProgressIndicator`] to a router:
//! `start` from a global guard once per navigation, `done` from an after hook.

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ProgressConfig;
use crate::router::{GuardDecision, Router};

/// Highest value trickling can reach before `done`.
const TRICKLE_CEILING: f64 = 0.994;

/// Start/finish feedback for a navigation.
pub trait ProgressIndicator: Send + Sync {
    /// Show the indicator, or reset it if already running.
    fn start(&self);
    /// Complete and hide the indicator. No-op when not running.
    fn done(&self);
}

/// Wire an indicator to a router.
///
/// The guard registered here always proceeds, so register it before guards
/// that may redirect or abort. Redirects send a navigation through the global
/// guards again; `start` only fires on the first pass. Every navigation that
/// reaches the guards is followed by exactly one after-hook call, so each
/// `start` is paired with one `done`, including aborted and redirected
/// navigations.
pub fn bind<V, I>(router: &mut Router<V>, indicator: Arc<I>)
where
    V: 'static,
    I: ProgressIndicator + ?Sized + 'static,
{
    let in_flight = Arc::new(AtomicBool::new(false));

    let on_start = Arc::clone(&indicator);
    let starting = Arc::clone(&in_flight);
    router.before_each(move |_, _| {
        if !starting.swap(true, Ordering::SeqCst) {
            on_start.start();
        }
        GuardDecision::Proceed
    });
    router.after_each(move |_| {
        in_flight.store(false, Ordering::SeqCst);
        indicator.done();
    });
}

/// A slim top-of-page style progress bar.
#[derive(Debug)]
pub struct ProgressBar {
    minimum: f64,
    width: usize,
    status: Mutex<Option<f64>>,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(&ProgressConfig::default())
    }
}

impl ProgressBar {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            minimum: if config.minimum.is_finite() {
                config.minimum.clamp(0.0, 1.0)
            } else {
                ProgressConfig::default().minimum
            },
            width: config.width,
            status: Mutex::new(None),
        }
    }

    fn status_lock(&self) -> MutexGuard<'_, Option<f64>> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current fraction, or `None` while hidden.
    pub fn status(&self) -> Option<f64> {
        *self.status_lock()
    }

    pub fn is_started(&self) -> bool {
        self.status().is_some()
    }

    /// Show the bar at `n`, clamped to `[minimum, 1]`.
    pub fn set(&self, n: f64) {
        *self.status_lock() = Some(n.clamp(self.minimum, 1.0));
    }

    /// Trickle forward by a step that shrinks as the bar fills.
    pub fn inc(&self) {
        let mut status = self.status_lock();
        match *status {
            None => *status = Some(self.minimum),
            Some(n) => {
                let next = (n + trickle_step(n)).clamp(0.0, TRICKLE_CEILING);
                *status = Some(next.max(n));
            }
        }
    }

    /// Render as a fixed-width text line; empty while hidden.
    pub fn render(&self) -> String {
        match self.status() {
            None => String::new(),
            Some(n) => {
                let filled = ((n * self.width as f64).round() as usize).min(self.width);
                format!(
                    "[{}{}] {:>3}%",
                    "#".repeat(filled),
                    " ".repeat(self.width - filled),
                    (n * 100.0).round() as u32
                )
            }
        }
    }
}

impl ProgressIndicator for ProgressBar {
    fn start(&self) {
        let mut status = self.status_lock();
        if status.is_some() {
            debug!("Progress restarted while running");
        }
        *status = Some(self.minimum);
    }

    fn done(&self) {
        let mut status = self.status_lock();
        if status.take().is_some() {
            debug!("Progress done");
        }
    }
}

fn trickle_step(n: f64) -> f64 {
    if n < 0.2 {
        0.1
    } else if n < 0.5 {
        0.04
    } else if n < 0.8 {
        0.02
    } else if n < 0.99 {
        0.005
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_shows_minimum() {
        let bar = ProgressBar::default();
        assert_eq!(bar.status(), None);
        bar.start();
        assert_eq!(bar.status(), Some(0.08));
    }

    #[test]
    fn test_second_start_resets_instead_of_stacking() {
        let bar = ProgressBar::default();
        bar.start();
        bar.inc();
        bar.inc();
        assert!(bar.status().unwrap() > 0.08);

        bar.start();
        assert_eq!(bar.status(), Some(0.08));

        // One done is enough to hide it again
        bar.done();
        assert!(!bar.is_started());
    }

    #[test]
    fn test_done_without_start_is_noop() {
        let bar = ProgressBar::default();
        bar.done();
        bar.done();
        assert_eq!(bar.status(), None);
    }

    #[test]
    fn test_inc_never_reaches_one() {
        let bar = ProgressBar::default();
        bar.start();
        for _ in 0..1000 {
            bar.inc();
        }
        let n = bar.status().unwrap();
        assert!(n <= TRICKLE_CEILING);
        assert!(n > 0.98);
    }

    #[test]
    fn test_inc_when_hidden_starts() {
        let bar = ProgressBar::default();
        bar.inc();
        assert_eq!(bar.status(), Some(0.08));
    }

    #[test]
    fn test_set_clamps() {
        let bar = ProgressBar::default();
        bar.set(0.0);
        assert_eq!(bar.status(), Some(0.08));
        bar.set(4.0);
        assert_eq!(bar.status(), Some(1.0));
    }

    #[test]
    fn test_render() {
        let bar = ProgressBar::new(&ProgressConfig {
            minimum: 0.5,
            width: 10,
        });
        assert_eq!(bar.render(), "");
        bar.start();
        assert_eq!(bar.render(), "[#####     ]  50%");
        bar.set(1.0);
        assert_eq!(bar.render(), "[##########] 100%");
    }

    #[test]
    fn test_non_finite_minimum_falls_back_to_default() {
        let bar = ProgressBar::new(&ProgressConfig {
            minimum: f64::NAN,
            width: 10,
        });
        bar.set(0.5);
        assert_eq!(bar.status(), Some(0.5));
        bar.start();
        assert_eq!(bar.status(), Some(0.08));
    }
}
