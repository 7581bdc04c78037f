//! Timed animation playback.
//!
//! A playthrough "suspends" only while a scripted animation runs: the intro
//! travel up to the checkpoint, and the branch animation after an answer.
//! [`Animation`] models one such interval as a cancellable, awaitable
//! resource: it fires once when the interval elapses, and dropping it aborts
//! the timer task, so no animation outlives the screen that started it.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub struct Animation {
    handle: JoinHandle<()>,
    done: oneshot::Receiver<()>,
    started_at: Instant,
    duration: Duration,
    finished: bool,
}

impl Animation {
    /// Start playback of a fixed-length animation.
    pub fn start(duration: Duration) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(());
        });
        Self {
            handle,
            done: rx,
            started_at: Instant::now(),
            duration,
            finished: false,
        }
    }

    /// Start playback measured in milliseconds, as branch cues are scripted.
    pub fn start_ms(duration_ms: u64) -> Self {
        Self::start(Duration::from_millis(duration_ms))
    }

    /// Fraction of the interval elapsed, clamped to `0.0..=1.0`. For
    /// rendering; completion is decided by [`poll_finished`](Self::poll_finished).
    pub fn progress(&self) -> f32 {
        if self.finished || self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.started_at.elapsed().as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).min(1.0)
    }

    /// Non-blocking completion check, suitable for a tick loop. Once true,
    /// stays true.
    pub fn poll_finished(&mut self) -> bool {
        if self.finished {
            return true;
        }
        match self.done.try_recv() {
            Ok(()) => {
                self.finished = true;
                true
            }
            Err(TryRecvError::Empty) => false,
            // Sender dropped without firing: the task was aborted; treat the
            // animation as over rather than spinning forever.
            Err(TryRecvError::Closed) => {
                self.finished = true;
                true
            }
        }
    }

    /// Wait for the interval to elapse.
    pub async fn finished(&mut self) {
        if self.finished {
            return;
        }
        let _ = (&mut self.done).await;
        self.finished = true;
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_duration() {
        let mut animation = Animation::start(Duration::from_millis(500));
        animation.finished().await;
        assert!(animation.poll_finished());
        assert_eq!(animation.progress(), 1.0);
        // Single-fire: polling again is still (and only ever) true.
        assert!(animation.poll_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn progress_is_clamped() {
        let mut animation = Animation::start(Duration::from_secs(2));
        assert!(animation.progress() < 1.0);
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(animation.progress(), 1.0);
        animation.finished().await;
    }

    #[tokio::test(start_paused = true)]
    async fn not_finished_before_deadline() {
        let mut animation = Animation::start(Duration::from_secs(10));
        tokio::task::yield_now().await;
        assert!(!animation.poll_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_timer_task() {
        let animation = Animation::start(Duration::from_secs(3600));
        drop(animation);
        // The aborted task must not keep the paused clock busy; advancing
        // past the deadline completes without the timer ever firing.
        tokio::time::advance(Duration::from_secs(7200)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_length_cue_completes_immediately() {
        let mut animation = Animation::start_ms(0);
        assert_eq!(animation.progress(), 1.0);
        animation.finished().await;
        assert!(animation.poll_finished());
    }
}
