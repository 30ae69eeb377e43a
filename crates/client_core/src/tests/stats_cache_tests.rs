use super::*;

use std::{sync::atomic::Ordering, time::Duration};

use crate::fixtures::FakeSeatingApi;

fn live_stats() -> DashboardStats {
    DashboardStats {
        total_employees: 12,
        total_floors: 2,
        total_offices: 5,
        total_seats: 20,
        occupied_seats: 9,
        occupancy_rate: 45.0,
    }
}

async fn api_with_stats() -> Arc<FakeSeatingApi> {
    let api = Arc::new(FakeSeatingApi::with_floors(Vec::new()));
    *api.stats.lock().await = Some(live_stats());
    api
}

#[tokio::test]
async fn second_call_reuses_cached_result() {
    let api = api_with_stats().await;
    let cache = DashboardStatsCache::new(api.clone());
    assert!(!cache.is_cached());

    assert_eq!(cache.get_stats().await, live_stats());
    assert_eq!(cache.get_stats().await, live_stats());
    assert!(cache.is_cached());
    assert_eq!(api.stats_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_callers_share_one_request() {
    let api = api_with_stats().await;
    *api.stats_delay.lock().await = Some(Duration::from_millis(20));
    let cache = DashboardStatsCache::new(api.clone());

    let (a, b, c) = tokio::join!(cache.get_stats(), cache.get_stats(), cache.get_stats());

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(api.stats_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reset_forces_a_new_fetch() {
    let api = api_with_stats().await;
    let cache = DashboardStatsCache::new(api.clone());
    cache.get_stats().await;

    let mut updated = live_stats();
    updated.total_seats = 21;
    *api.stats.lock().await = Some(updated.clone());
    assert_eq!(cache.get_stats().await, live_stats());

    cache.reset_stats();
    assert!(!cache.is_cached());
    assert_eq!(cache.get_stats().await, updated);
    assert_eq!(api.stats_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistent_failure_resolves_to_fallback_and_is_memoized() {
    let api = api_with_stats().await;
    api.fail_with(502).await;
    let cache = DashboardStatsCache::new(api.clone());

    assert_eq!(cache.get_stats().await, DashboardStats::fallback());

    api.recover().await;
    assert_eq!(cache.get_stats().await, DashboardStats::fallback());
    assert_eq!(api.stats_fetches.load(Ordering::SeqCst), 1);

    cache.reset_stats();
    assert_eq!(cache.get_stats().await, live_stats());
}
