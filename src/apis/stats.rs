/// Request statistics for a gateway instance
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the counters
///
/// The tracker only fills the request fields; the owner of the cache copies
/// its lookup metrics into the `cache_*` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_expirations: u64,
    pub average_response_time_ms: f64,
}

impl ApiStats {
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct ApiStatsTracker {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_response_time_ms: Mutex<f64>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outbound call and how long it took
    pub fn record_request(&self, success: bool, elapsed_ms: f64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
        *self.total_response_time_ms.lock() += elapsed_ms;
    }

    pub fn get_stats(&self) -> ApiStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let total_time = *self.total_response_time_ms.lock();

        ApiStats {
            total_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            average_response_time_ms: if total_requests == 0 {
                0.0
            } else {
                total_time / total_requests as f64
            },
            ..ApiStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_all_requests() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0);
        tracker.record_request(false, 300.0);

        let stats = tracker.get_stats();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.average_response_time_ms, 200.0);
    }

    #[test]
    fn hit_rate_handles_no_lookups() {
        let tracker = ApiStatsTracker::new();
        assert_eq!(tracker.get_stats().cache_hit_rate(), 0.0);

        let stats = ApiStats {
            cache_hits: 3,
            cache_misses: 1,
            ..tracker.get_stats()
        };
        assert_eq!(stats.cache_hit_rate(), 0.75);
    }
}
