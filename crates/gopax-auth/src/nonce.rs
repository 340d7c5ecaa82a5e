//! Nonce generation
//!
//! The exchange rejects a signed request whose nonce it has already seen or
//! that is older than a previous one. Nonces here are epoch milliseconds,
//! bumped by one when two requests land in the same millisecond.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

/// Milliseconds since the Unix epoch (0 if the clock is before 1970)
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Anything that can hand out nonces for signed requests
///
/// Implementations must never return the same value twice.
pub trait NonceSource: Send + Sync {
    /// Produce the nonce for the next request
    ///
    /// # Errors
    /// [`AuthError::NonceExhausted`] once no larger value is left.
    fn next_nonce(&self) -> AuthResult<u64>;
}

/// Wall-clock nonce that is strictly increasing across threads
#[derive(Debug, Default)]
pub struct MonotonicNonce {
    last: AtomicU64,
}

impl MonotonicNonce {
    /// Create a new nonce source
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Produce a nonce of at least `now`
    ///
    /// Split out from [`NonceSource::next_nonce`] so the clock can be pinned.
    pub fn next_after(&self, now: u64) -> AuthResult<u64> {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                last.checked_add(1).map(|next| now.max(next))
            })
            .map_err(|_| AuthError::NonceExhausted)?;
        // The update succeeded, so `previous + 1` fits
        Ok(now.max(previous + 1))
    }
}

impl NonceSource for MonotonicNonce {
    fn next_nonce(&self) -> AuthResult<u64> {
        self.next_after(now_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_follows_clock() {
        let source = MonotonicNonce::new();
        assert_eq!(source.next_after(1_000).unwrap(), 1_000);
        assert_eq!(source.next_after(2_000).unwrap(), 2_000);
    }

    #[test]
    fn test_same_millisecond_bumps() {
        let source = MonotonicNonce::new();
        assert_eq!(source.next_after(5_000).unwrap(), 5_000);
        assert_eq!(source.next_after(5_000).unwrap(), 5_001);
        // Clock stepping backwards still moves forward
        assert_eq!(source.next_after(4_000).unwrap(), 5_002);
    }

    #[test]
    fn test_exhausted_source_errors_instead_of_wrapping() {
        let source = MonotonicNonce::new();
        assert_eq!(source.next_after(u64::MAX).unwrap(), u64::MAX);
        assert!(matches!(source.next_after(5), Err(AuthError::NonceExhausted)));
        // Still exhausted; the stored value is untouched
        assert!(matches!(source.next_after(u64::MAX), Err(AuthError::NonceExhausted)));
    }

    #[test]
    fn test_wall_clock_nonce_is_epoch_millis() {
        let before = now_millis();
        let nonce = MonotonicNonce::new().next_nonce().unwrap();
        assert!(nonce >= before);
        assert!(nonce.to_string().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_unique_across_threads() {
        let source = Arc::new(MonotonicNonce::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || (0..250).map(|_| source.next_nonce().unwrap()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }
}
