// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-interval replay of a finished trace.
//!
//! At most one timer task runs per [`Playback`]. Stopping aborts the task
//! and keeps the cursor where it is, so a later `start` resumes. Dropping
//! the playback aborts the task too.

use super::trace::{BacktrackingStep, Trace};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Default)]
struct Cursor {
    index: usize,
    running: bool,
}

/// Replay controller over a [`Trace`].
///
/// `start` spawns onto the current tokio runtime, so it must be called from
/// within one.
#[derive(Debug)]
pub struct Playback {
    trace: Arc<Trace>,
    interval: Duration,
    cursor: Arc<Mutex<Cursor>>,
    updates: Arc<watch::Sender<usize>>,
    timer: Option<JoinHandle<()>>,
}

impl Playback {
    pub fn new(trace: impl Into<Arc<Trace>>, interval: Duration) -> Self {
        let (updates, _) = watch::channel(0);
        Playback {
            trace: trace.into(),
            interval,
            cursor: Arc::new(Mutex::new(Cursor::default())),
            updates: Arc::new(updates),
            timer: None,
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the tick interval. Takes effect at the next `start`.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Receives the cursor index after every change.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.updates.subscribe()
    }

    pub fn index(&self) -> usize {
        self.cursor.lock().index
    }

    pub fn current_step(&self) -> Option<&BacktrackingStep> {
        self.trace.steps.get(self.index())
    }

    pub fn is_running(&self) -> bool {
        self.cursor.lock().running
    }

    pub fn is_at_end(&self) -> bool {
        self.index() + 1 >= self.trace.len()
    }

    /// Begin advancing one step per interval.
    ///
    /// A no-op while already running or when the trace is empty. Starting
    /// from the last step rewinds to the first.
    pub fn start(&mut self) {
        let len = self.trace.len();
        {
            let mut cursor = self.cursor.lock();
            if cursor.running || len == 0 {
                return;
            }
            if cursor.index + 1 >= len {
                cursor.index = 0;
                self.updates.send_replace(0);
            }
            cursor.running = true;
        }
        if let Some(stale) = self.timer.take() {
            stale.abort();
        }

        let cursor = Arc::clone(&self.cursor);
        let updates = Arc::clone(&self.updates);
        let period = self.interval.max(Duration::from_millis(1));
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut guard = cursor.lock();
                if guard.index + 1 < len {
                    guard.index += 1;
                }
                let index = guard.index;
                let finished = index + 1 >= len;
                if finished {
                    guard.running = false;
                }
                drop(guard);
                updates.send_replace(index);
                if finished {
                    tracing::debug!(index, "playback reached the last step");
                    break;
                }
            }
        }));
    }

    /// Halt the timer, keeping the cursor.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.cursor.lock().running = false;
    }

    /// Stop and rewind to the first step.
    pub fn reset(&mut self) {
        self.stop();
        self.seek(0);
    }

    pub fn step_forward(&mut self) {
        let index = self.index();
        self.seek(index + 1);
    }

    pub fn step_backward(&mut self) {
        let index = self.index();
        self.seek(index.saturating_sub(1));
    }

    /// Move the cursor, clamped to the trace.
    pub fn seek(&mut self, index: usize) {
        let last = self.trace.len().saturating_sub(1);
        let index = index.min(last);
        self.cursor.lock().index = index;
        self.updates.send_replace(index);
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtracking::{generate_steps, BacktrackingConfig, NQueensConfig};

    const TICK: Duration = Duration::from_millis(300);

    fn playback() -> Playback {
        let trace = generate_steps(&BacktrackingConfig::NQueens(NQueensConfig::default())).unwrap();
        Playback::new(trace, TICK)
    }

    async fn wait(ticks: u32) {
        tokio::time::sleep(TICK * ticks + TICK / 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn advances_one_step_per_tick() {
        let mut playback = playback();
        playback.start();
        assert!(playback.is_running());
        wait(3).await;
        assert_eq!(playback.index(), 3);
        assert_eq!(
            playback.current_step().unwrap().description,
            playback.trace().steps[3].description
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stop_keeps_the_cursor_and_start_resumes() {
        let mut playback = playback();
        playback.start();
        wait(2).await;
        playback.stop();
        assert!(!playback.is_running());
        wait(4).await;
        assert_eq!(playback.index(), 2);

        playback.start();
        wait(1).await;
        assert_eq!(playback.index(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_twice_does_not_double_the_speed() {
        let mut playback = playback();
        playback.start();
        playback.start();
        wait(2).await;
        assert_eq!(playback.index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_the_end_then_restarts_from_zero() {
        let mut playback = playback();
        let last = playback.trace().len() - 1;
        playback.seek(last - 1);
        playback.start();
        wait(3).await;
        assert_eq!(playback.index(), last);
        assert!(!playback.is_running());
        assert!(playback.is_at_end());

        playback.start();
        assert_eq!(playback.index(), 0);
        assert!(playback.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_stepping_is_clamped() {
        let mut playback = playback();
        playback.step_backward();
        assert_eq!(playback.index(), 0);
        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.index(), 2);
        playback.seek(usize::MAX);
        assert_eq!(playback.index(), playback.trace().len() - 1);
        playback.reset();
        assert_eq!(playback.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_cursor_changes() {
        let mut playback = playback();
        let mut updates = playback.subscribe();
        playback.start();
        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow(), 1);
    }
}
