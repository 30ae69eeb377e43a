use std::sync::{Arc, Mutex, PoisonError};

use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use shared::protocol::DashboardStats;
use tracing::{info, warn};

use crate::transport::SeatingApi;

type PendingStats = Shared<BoxFuture<'static, DashboardStats>>;

/// Memoized dashboard statistics. All callers within one cache epoch share
/// a single request; `reset_stats` starts a new epoch.
pub struct DashboardStatsCache {
    api: Arc<dyn SeatingApi>,
    pending: Mutex<Option<PendingStats>>,
}

impl DashboardStatsCache {
    pub fn new(api: Arc<dyn SeatingApi>) -> Arc<Self> {
        Arc::new(Self {
            api,
            pending: Mutex::new(None),
        })
    }

    pub async fn get_stats(&self) -> DashboardStats {
        let pending = {
            let mut guard = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            guard.get_or_insert_with(|| self.fetch()).clone()
        };
        pending.await
    }

    pub fn reset_stats(&self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_cached(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn fetch(&self) -> PendingStats {
        let api = Arc::clone(&self.api);
        async move {
            match api.dashboard_stats().await {
                Ok(stats) => {
                    info!(
                        "stats: received dashboard stats employees={} seats={} occupied={}",
                        stats.total_employees, stats.total_seats, stats.occupied_seats
                    );
                    stats
                }
                Err(err) => {
                    warn!("stats: error fetching stats from server, using fallback data: {err}");
                    DashboardStats::fallback()
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
#[path = "tests/stats_cache_tests.rs"]
mod tests;
