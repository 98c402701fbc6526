//! `tally watch`: drive the foreground sync from lifecycle events on stdin
//!
//! Each input line names an app state (`active`, `background`, `inactive`).
//! Syncs fire once the configured debounce has passed. End of input flushes a
//! scheduled sync and tears the hook down.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use crate::config::settings::Settings;
use crate::error::TallyResult;
use crate::services::{AppState, ForegroundSync, RecurringService, SyncOutcome};
use crate::storage::Storage;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn report(outcome: Option<SyncOutcome>) {
    match outcome {
        Some(SyncOutcome::Completed(report)) => println!(
            "Synced: checked {} recurring transaction(s), created {} transaction(s)",
            report.templates_checked, report.transactions_created
        ),
        Some(SyncOutcome::Failed(reason)) => eprintln!("Sync failed: {}", reason),
        Some(SyncOutcome::Discarded) | None => {}
    }
}

/// Handle the watch command
pub fn handle_watch_command(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut hook = ForegroundSync::with_settings(RecurringService::new(storage), settings);

    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => match line.parse::<AppState>() {
                Ok(state) => hook.on_app_state_change(state, Instant::now()),
                Err(e) => warn!("Ignoring input: {}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        report(hook.poll(Instant::now()));
    }

    if let Some(deadline) = hook.deadline() {
        thread::sleep(deadline.saturating_duration_since(Instant::now()));
        report(hook.poll(deadline));
    }
    hook.teardown();

    Ok(())
}
