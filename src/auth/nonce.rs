//! Nonces for signed Buda requests.
//!
//! Buda keeps the last nonce it accepted per API key and rejects any request
//! whose nonce is not above it. Page requests are signed from concurrent
//! tasks, so one [`IncreasingNonce`] is shared by every clone of a client.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Source of nonces for the `X-SBTC-NONCE` header.
pub trait NonceProvider: Send + Sync {
    /// Next nonce; greater than every value returned before.
    fn next_nonce(&self) -> u64;
}

/// Microsecond clock nonces that never repeat or go backwards.
///
/// Each nonce is `max(now_micros, last + 1)`, so a burst of requests inside
/// one microsecond, or a wall clock stepping back, still yields increasing
/// values.
pub struct IncreasingNonce {
    last: AtomicU64,
    clock: fn() -> u64,
}

impl IncreasingNonce {
    /// Nonces from the system clock.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Nonces that are all greater than `floor`.
    ///
    /// Use this when the key was last used with a nonce ahead of this
    /// machine's clock, for example one issued by another host.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
            clock: unix_micros,
        }
    }

    /// The most recent nonce handed out, or the floor if none was.
    pub fn last_issued(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock,
        }
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = (self.clock)();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }
}

fn unix_micros() -> u64 {
    let micros = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000;
    u64::try_from(micros).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_nonce_is_microsecond_timestamp() {
        let nonce = IncreasingNonce::new().next_nonce();
        // 2020-01-01 in microseconds; a millisecond or nanosecond clock would miss this band.
        assert!(nonce > 1_577_836_800_000_000);
        assert!(nonce < 1_577_836_800_000_000 * 10);
    }

    #[test]
    fn test_frozen_clock_still_increases() {
        let provider = IncreasingNonce::with_clock(|| 1_000);
        let nonces: Vec<u64> = (0..5).map(|_| provider.next_nonce()).collect();
        assert_eq!(nonces, vec![1_000, 1_001, 1_002, 1_003, 1_004]);
        assert_eq!(provider.last_issued(), 1_004);
    }

    #[test]
    fn test_clock_stepping_back() {
        let provider = IncreasingNonce::with_clock(|| 500);
        provider.last.store(2_000, Ordering::SeqCst);
        assert_eq!(provider.next_nonce(), 2_001);
    }

    #[test]
    fn test_starting_after_floor() {
        let floor = unix_micros() + 60_000_000;
        let provider = IncreasingNonce::starting_after(floor);
        assert_eq!(provider.last_issued(), floor);
        assert_eq!(provider.next_nonce(), floor + 1);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = Arc::new(IncreasingNonce::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = provider.clone();
                thread::spawn(move || (0..1000).map(|_| provider.next_nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            assert!(nonces.windows(2).all(|w| w[0] < w[1]));
            for nonce in nonces {
                assert!(seen.insert(nonce), "nonce {nonce} issued twice");
            }
        }
        assert_eq!(provider.last_issued(), *seen.iter().max().unwrap());
    }
}
