// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cooperative cancellation and pacing for streaming runs.
//!
//! A streaming engine drives its own clock: after each visible mutation it
//! calls [`Pacer::pause`], which checks the shared [`CancellationToken`],
//! sleeps for a fraction of the configured delay, and checks again. A
//! cancelled check yields [`Cancelled`], which engines propagate with `?`
//! so that nothing is mutated after a stop request has been observed.
//!
//! # Example
//!
//! ```
//! use algo_stepper::control::{CancellationToken, Pacer};
//! use std::time::Duration;
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! rt.block_on(async {
//!     let token = CancellationToken::new();
//!     let pacer = Pacer::new(Duration::ZERO, token.clone());
//!     assert!(pacer.pause(1.0).await.is_ok());
//!     token.cancel();
//!     assert!(pacer.pause(1.0).await.is_err());
//! });
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared stop flag. Clones observe the same flag.
///
/// This is a plain synchronous flag that engines poll between steps. It
/// has no waker and is not `tokio_util`'s token of the same name, and unlike
/// that token it can be reset for another run.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that every run holding this token stops at its next check.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can drive a fresh run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// `Err(Cancelled)` once the flag is set.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Marker returned when a run observes its token set.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("run cancelled")]
pub struct Cancelled;

/// How a streaming run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

impl From<Result<(), Cancelled>> for RunOutcome {
    fn from(result: Result<(), Cancelled>) -> Self {
        match result {
            Ok(()) => RunOutcome::Completed,
            Err(Cancelled) => RunOutcome::Cancelled,
        }
    }
}

/// Paces a streaming run and polls its cancellation token.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    token: CancellationToken,
}

impl Pacer {
    pub fn new(delay: Duration, token: CancellationToken) -> Self {
        Pacer { delay, token }
    }

    pub fn from_millis(speed_ms: u64, token: CancellationToken) -> Self {
        Pacer::new(Duration::from_millis(speed_ms), token)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check, wait `delay * fraction`, check again.
    ///
    /// A zero delay still yields to the scheduler so a concurrent stop
    /// request gets a chance to land.
    pub async fn pause(&self, fraction: f64) -> Result<(), Cancelled> {
        self.token.check()?;
        let wait = self.delay.mul_f64(fraction.max(0.0));
        if wait.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(wait).await;
        }
        self.token.check()
    }
}

/// Integer progress `floor(step / total * 100)`, capped at 100.
pub fn percent(step: usize, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    let value = (step as f64 / total * 100.0).floor();
    value.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        assert_eq!(other.check(), Err(Cancelled));
        other.reset();
        assert!(token.check().is_ok());
    }

    #[test]
    fn percent_floors_and_caps() {
        assert_eq!(percent(0, 10.0), 0);
        assert_eq!(percent(1, 3.0), 33);
        assert_eq!(percent(15, 10.0), 100);
        assert_eq!(percent(3, 0.0), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_sleeps_for_the_requested_fraction() {
        let pacer = Pacer::from_millis(100, CancellationToken::new());
        let start = tokio::time::Instant::now();
        pacer.pause(0.5).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_sleep_is_seen_after_waking() {
        let token = CancellationToken::new();
        let pacer = Pacer::from_millis(100, token.clone());
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        assert_eq!(pacer.pause(1.0).await, Err(Cancelled));
        stopper.await.unwrap();
    }

    #[test]
    fn outcome_from_result() {
        assert_eq!(RunOutcome::from(Ok(())), RunOutcome::Completed);
        assert_eq!(RunOutcome::from(Err(Cancelled)), RunOutcome::Cancelled);
    }
}
