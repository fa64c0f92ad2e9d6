use std::collections::HashMap;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

/// Windowed request/response/bytes counters shared between the ingestion
/// path and the report loop.
///
/// Invariants:
/// - Request and response counts are guarded independently, so recording a
///   section never contends with recording a status code
/// - Increments on the same map are serialized (no lost updates)
/// - [`StatsAggregator::flush`] takes the whole window and resets it in one
///   critical section; no increment can land between the read and the reset
#[derive(Debug, Default)]
pub struct StatsAggregator {
    requests: RwLock<HashMap<String, u64>>,
    responses: RwLock<HashMap<u16, u64>>,
    bytes: AtomicU64,
}

/// A point-in-time copy of one report window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSnapshot {
    /// (count, section), count descending then section ascending
    pub requests: Vec<(u64, String)>,
    /// (count, code), count descending then code ascending
    pub responses: Vec<(u64, u16)>,
    pub total_bytes: u64,
}

impl ReportSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_bytes == 0 && self.requests.is_empty() && self.responses.is_empty()
    }
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hit for the section of `path`.
    pub fn record_request(&self, path: &str) {
        let section = section_of(path);
        let mut requests = write(&self.requests);
        *requests.entry(section).or_insert(0) += 1;
    }

    pub fn record_response(&self, code: u16) {
        let mut responses = write(&self.responses);
        *responses.entry(code).or_insert(0) += 1;
    }

    pub fn add_bytes(&self, n: u64) {
        // Saturate rather than wrap on absurd totals.
        let _ = self
            .bytes
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |b| {
                Some(b.saturating_add(n))
            });
    }

    /// Read the current window without resetting it.
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> ReportSnapshot {
        let requests = self.requests.read().unwrap_or_else(PoisonError::into_inner);
        let responses = self.responses.read().unwrap_or_else(PoisonError::into_inner);

        build_snapshot(
            requests.iter().map(|(s, c)| (*c, s.clone())).collect(),
            responses.iter().map(|(code, c)| (*c, *code)).collect(),
            self.bytes.load(Ordering::Relaxed),
        )
    }

    /// Take the current window and start a new, empty one.
    pub fn flush(&self) -> ReportSnapshot {
        // Lock order: requests, then responses. Every multi-lock path uses it.
        let mut requests = write(&self.requests);
        let mut responses = write(&self.responses);

        let requests = mem::take(&mut *requests);
        let responses = mem::take(&mut *responses);
        let total_bytes = self.bytes.swap(0, Ordering::Relaxed);

        build_snapshot(
            requests.into_iter().map(|(s, c)| (c, s)).collect(),
            responses.into_iter().map(|(code, c)| (c, code)).collect(),
            total_bytes,
        )
    }

    /// Reset all counters to empty/zero.
    pub fn clear(&self) {
        let mut requests = write(&self.requests);
        let mut responses = write(&self.responses);

        requests.clear();
        responses.clear();
        self.bytes.store(0, Ordering::Relaxed);
    }
}

fn build_snapshot(
    mut requests: Vec<(u64, String)>,
    mut responses: Vec<(u64, u16)>,
    total_bytes: u64,
) -> ReportSnapshot {
    requests.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    responses.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    ReportSnapshot {
        requests,
        responses,
        total_bytes,
    }
}

/// Aggregation key for a request path.
///
/// With more than one `/` in the path the section is `/` plus the first
/// non-empty segment; otherwise it is `/`.
///
/// `/api/v1/users` -> `/api`, `/a` -> `/`, `favicon.ico` -> `/`
pub fn section_of(path: &str) -> String {
    if path.matches('/').count() <= 1 {
        return "/".to_string();
    }

    match path.split('/').find(|segment| !segment.is_empty()) {
        Some(first) => format!("/{first}"),
        None => "/".to_string(),
    }
}

// A poisoned lock only means another thread panicked mid-increment; the
// counters themselves are still consistent integers.
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
