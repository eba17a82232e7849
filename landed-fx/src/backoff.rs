use std::time::Duration;

/// Refresh interval while fetches succeed.
pub const BASE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Ceiling for the failure backoff.
pub const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Delay until the next fetch, as a pure function of how many fetches in a
/// row have failed. Doubles per consecutive failure, capped at the ceiling.
pub fn backoff_delay(consecutive_failures: u32) -> Duration {
    // Three doublings already exceed the ceiling.
    let doublings = consecutive_failures.min(3);
    (BASE_INTERVAL * 2u32.pow(doublings)).min(MAX_INTERVAL)
}
