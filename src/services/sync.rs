//! Foreground recurring sync
//!
//! Coalesces bursts of "app came to the foreground" events into a single
//! recurring sync once the debounce delay has passed. The caller drives it by
//! reporting state changes and polling with a monotonic clock.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::settings::Settings;
use crate::error::TallyResult;

use super::recurring::SyncReport;

/// Anything that can bring recurring templates up to date
pub trait RecurringSynchronizer {
    fn synchronize_all(&self, now: DateTime<Utc>) -> TallyResult<SyncReport>;
}

impl<T: RecurringSynchronizer + ?Sized> RecurringSynchronizer for &T {
    fn synchronize_all(&self, now: DateTime<Utc>) -> TallyResult<SyncReport> {
        (**self).synchronize_all(now)
    }
}

/// Lifecycle state reported by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Active,
    Background,
    Inactive,
}

impl FromStr for AppState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "foreground" => Ok(Self::Active),
            "background" => Ok(Self::Background),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown app state: {}", other)),
        }
    }
}

/// What a fired sync produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncReport),
    /// The sync failed; the error was logged and nothing is retried
    Failed(String),
    /// The hook was torn down while the sync ran
    Discarded,
}

/// Debounced sync trigger for foreground transitions
pub struct ForegroundSync<S> {
    synchronizer: S,
    delay: Duration,
    last_state: Option<AppState>,
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl<S: RecurringSynchronizer> ForegroundSync<S> {
    pub fn new(synchronizer: S, delay: Duration) -> Self {
        Self {
            synchronizer,
            delay,
            last_state: None,
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Hook using the configured `sync_debounce_ms`
    pub fn with_settings(synchronizer: S, settings: &Settings) -> Self {
        Self::new(synchronizer, settings.sync_debounce())
    }

    /// Shared flag that tears the hook down when set
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// When the next sync will fire, if one is scheduled
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a lifecycle change; entering `Active` (re)arms the debounce
    pub fn on_app_state_change(&mut self, state: AppState, at: Instant) {
        if self.is_torn_down() {
            return;
        }

        let previous = self.last_state.replace(state);
        if state == AppState::Active && previous != Some(AppState::Active) {
            self.deadline = Some(at + self.delay);
            debug!("Foreground sync armed for {:?} from now", self.delay);
        }
    }

    /// Run the pending sync if its deadline has passed
    pub fn poll(&mut self, at: Instant) -> Option<SyncOutcome> {
        if self.is_torn_down() {
            self.deadline = None;
            return None;
        }

        let deadline = self.deadline?;
        if at < deadline {
            return None;
        }
        self.deadline = None;

        let result = self.synchronizer.synchronize_all(Utc::now());

        if self.is_torn_down() {
            debug!("Foreground sync finished after teardown; result discarded");
            return Some(SyncOutcome::Discarded);
        }

        match result {
            Ok(report) => {
                info!(
                    "Foreground sync checked {} template(s), created {} transaction(s)",
                    report.templates_checked, report.transactions_created
                );
                Some(SyncOutcome::Completed(report))
            }
            Err(e) => {
                warn!("Foreground sync failed: {}", e);
                Some(SyncOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Stop all further syncs and discard any in flight
    pub fn teardown(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.deadline = None;
    }
}
