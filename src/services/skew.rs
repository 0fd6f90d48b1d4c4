//! Clock-skew freshness policy.

/// Default tolerated clock skew: ±5 minutes in milliseconds.
///
/// Symmetric so that both slow and fast client clocks are tolerated
/// without distinguishing direction; five minutes balances replay surface
/// against realistic drift between distributed test runners and the server.
pub const DEFAULT_SKEW_WINDOW_MS: i64 = 300_000;

/// Whether a signed timestamp is fresh relative to `now_ms`.
///
/// The boundary is inclusive: a timestamp exactly `window_ms` away from
/// `now_ms` is still accepted.
pub fn is_fresh(timestamp_ms: i64, now_ms: i64, window_ms: i64) -> bool {
    (now_ms - timestamp_ms).abs() <= window_ms
}
