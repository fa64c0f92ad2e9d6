use super::render::format_clock;
use crate::conf::types::MAX_WINDOW_SECS;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Debug, Copy, Clone, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationState {
    Normal,
    Alerting,
}

/// A state transition produced by [`SaturationMonitor::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaturationEvent {
    Alert { hits: u64, at: DateTime<Local> },
    Recovered { at: DateTime<Local> },
}

impl fmt::Display for SaturationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationEvent::Alert { hits, at } => write!(
                f,
                "High traffic generated an alert - hits = {hits}, triggered at {}",
                format_clock(at)
            ),
            SaturationEvent::Recovered { at } => {
                write!(f, "High traffic recovered at {}", format_clock(at))
            }
        }
    }
}

/// Trailing-window hit counter with a two-state alert.
///
/// Hits are kept in a ring of per-second buckets instead of one timer per
/// hit, so memory is O(window) and every operation is O(1) regardless of
/// throughput. The ring has `window + 1` slots: the slot under the cursor
/// collects new hits, and each [`evaluate`](Self::evaluate) tick moves the
/// cursor forward and drops the slot that has aged past the window. A hit is
/// therefore counted by exactly `window` consecutive evaluations.
#[derive(Debug)]
pub struct SaturationMonitor {
    threshold: u64,
    ring: Mutex<Ring>,
}

#[derive(Debug)]
struct Ring {
    buckets: Vec<u64>,
    cursor: usize,
    // Sum of all buckets; never negative since it only loses what a bucket added.
    live: u64,
    state: SaturationState,
}

impl SaturationMonitor {
    /// `threshold = requests_per_second * window_secs`. Both are floored to 1
    /// and the window is capped at [`MAX_WINDOW_SECS`].
    pub fn new(requests_per_second: u64, window_secs: u64) -> Self {
        let window_secs = window_secs.clamp(1, MAX_WINDOW_SECS);
        let threshold = requests_per_second.max(1).saturating_mul(window_secs);
        let slots = window_secs as usize + 1;

        Self {
            threshold,
            ring: Mutex::new(Ring {
                buckets: vec![0; slots],
                cursor: 0,
                live: 0,
                state: SaturationState::Normal,
            }),
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Hits currently inside the trailing window.
    pub fn event_count(&self) -> u64 {
        self.lock().live
    }

    pub fn state(&self) -> SaturationState {
        self.lock().state
    }

    /// Count one hit in the current second.
    pub fn record_event(&self) {
        let mut guard = self.lock();
        let ring = &mut *guard;
        let slot = &mut ring.buckets[ring.cursor];
        *slot = slot.saturating_add(1);
        ring.live = ring.live.saturating_add(1);
    }

    /// Advance the window by one second and re-check the threshold.
    ///
    /// Called once per second. Returns the transition, if any.
    pub fn evaluate(&self) -> Option<SaturationEvent> {
        self.evaluate_at(Local::now())
    }

    pub(crate) fn evaluate_at(&self, now: DateTime<Local>) -> Option<SaturationEvent> {
        let mut guard = self.lock();
        let ring = &mut *guard;

        let next = (ring.cursor + 1) % ring.buckets.len();
        let expired = std::mem::take(&mut ring.buckets[next]);
        ring.live = ring.live.saturating_sub(expired);
        ring.cursor = next;

        let hits = ring.live;
        let event = match ring.state {
            SaturationState::Normal if hits >= self.threshold => {
                ring.state = SaturationState::Alerting;
                Some(SaturationEvent::Alert { hits, at: now })
            }
            SaturationState::Alerting if hits < self.threshold => {
                ring.state = SaturationState::Normal;
                Some(SaturationEvent::Recovered { at: now })
            }
            _ => None,
        };

        if event.is_some() {
            let to = ring.state;
            let from = match to {
                SaturationState::Alerting => SaturationState::Normal,
                SaturationState::Normal => SaturationState::Alerting,
            };
            info!(
                event = "saturation_transition",
                from = ?from,
                to = ?to,
                hits,
                threshold = self.threshold
            );
        }

        event
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
