//! Autosave Scheduler - delays whole-graph flushes until editing pauses.
//!
//! Every local mutation rearms a single deadline at `last mutation + delay`.
//! Bursts of edits closer together than the delay never flush; the flush
//! happens one full delay after the last edit (debounce, not throttle).

use tokio::time::{Duration, Instant, sleep_until};
use tracing::debug;

use crate::config::AutosaveConfig;

#[derive(Debug)]
pub struct AutosaveScheduler {
    delay: Duration,
    /// Monotonic timestamp of the mutation that armed the pending flush.
    last_mutation: Option<Instant>,
    /// Number of times the scheduler has been armed.
    arms: u64,
}

impl AutosaveScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_mutation: None,
            arms: 0,
        }
    }

    pub fn from_config(config: &AutosaveConfig) -> Self {
        Self::new(config.delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a mutation, replacing any outstanding deadline.
    pub fn arm(&mut self) {
        let now = Instant::now();
        if self.last_mutation.is_some() {
            debug!("Autosave: deadline reset");
        } else {
            debug!("Autosave: armed (delay={:?})", self.delay);
        }
        self.last_mutation = Some(now);
        self.arms += 1;
    }

    /// Drops the outstanding deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.last_mutation.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.last_mutation.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.last_mutation.map(|at| at + self.delay)
    }

    pub fn arm_count(&self) -> u64 {
        self.arms
    }

    /// Resolves once the outstanding deadline elapses and leaves the scheduler
    /// idle. Never resolves while idle.
    ///
    /// Cancel safe: dropping the future (e.g. when another `select!` branch
    /// wins) keeps the deadline pending.
    pub async fn fired(&mut self) {
        let Some(deadline) = self.deadline() else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        self.last_mutation = None;
        debug!("Autosave: deadline elapsed");
    }
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::from_config(&AutosaveConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_single_arm_fires_after_delay() {
        let mut scheduler = AutosaveScheduler::new(Duration::from_secs(60));
        let start = Instant::now();

        scheduler.arm();
        scheduler.fired().await;

        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_pushes_deadline_back() {
        let mut scheduler = AutosaveScheduler::new(Duration::from_secs(60));
        let start = Instant::now();

        scheduler.arm();
        advance(Duration::from_secs(30)).await;
        scheduler.arm();
        advance(Duration::from_secs(59)).await;
        scheduler.arm();
        scheduler.fired().await;

        assert_eq!(start.elapsed(), Duration::from_secs(30 + 59 + 60));
        assert_eq!(scheduler.arm_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_scheduler_never_fires() {
        let mut scheduler = AutosaveScheduler::new(Duration::from_secs(60));
        let result = timeout(Duration::from_secs(3600), scheduler.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_pending_deadline() {
        let mut scheduler = AutosaveScheduler::new(Duration::from_secs(60));
        scheduler.arm();
        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());

        let result = timeout(Duration::from_secs(120), scheduler.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_deadline() {
        let mut scheduler = AutosaveScheduler::new(Duration::from_secs(60));
        scheduler.arm();

        let early = timeout(Duration::from_secs(10), scheduler.fired()).await;
        assert!(early.is_err());
        assert!(scheduler.is_pending());

        scheduler.fired().await;
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(AutosaveScheduler::default().delay(), Duration::from_secs(60));
    }
}
