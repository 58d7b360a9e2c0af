use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;
use turf_store::FacilityStore;

/// Tick period for the sweeper. A zero-second interval would panic in
/// `tokio::time::interval`, so misconfigured values are raised to one.
fn sweep_period(interval_seconds: u64) -> Duration {
    Duration::from_secs(interval_seconds.max(1))
}

/// Server-side TTL enforcement. Lazy expiry on every read already hides
/// lapsed holds; this sweep reclaims the records so abandoned sessions
/// cannot grow the table. Client timers are never relied on.
pub async fn start_expiry_sweeper(store: Arc<FacilityStore>, interval_seconds: u64) {
    let mut ticker = interval(sweep_period(interval_seconds));

    info!(interval_seconds, "Expiry sweeper started");

    loop {
        ticker.tick().await;
        store.sweep_expired_holds().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_raised_to_one_second() {
        assert_eq!(sweep_period(0), Duration::from_secs(1));
        assert_eq!(sweep_period(30), Duration::from_secs(30));
    }
}
