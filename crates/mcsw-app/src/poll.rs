//! Periodic registry poll timer
//!
//! [`PollScheduler`] owns at most one background task that sends
//! [`Message::PollTick`] every period. Whether a tick actually fetches is
//! decided by the update function (a tick landing on an in-flight fetch is
//! dropped there).

use std::time::Duration;

use mcsw_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::MIN_POLL_INTERVAL_MS;
use crate::message::Message;

struct PollTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Singleton repeating timer for registry refreshes
pub struct PollScheduler {
    period: Duration,
    task: Option<PollTask>,
}

impl PollScheduler {
    /// Create a stopped scheduler. The period is clamped to the minimum
    /// poll interval.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(MIN_POLL_INTERVAL_MS)),
            task: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|t| !t.handle.is_finished())
            .unwrap_or(false)
    }

    /// Start ticking. Returns `false` (and does nothing) when a timer is
    /// already running, so a second call can never create a second timer.
    ///
    /// The first tick fires one full period after the start; callers that
    /// want an immediate refresh request it themselves.
    pub fn start(&mut self, msg_tx: mpsc::Sender<Message>) -> bool {
        if self.is_running() {
            debug!("Poll timer already running");
            return false;
        }

        let period = self.period;
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if msg_tx.send(Message::PollTick).await.is_err() {
                            debug!("Message channel closed, poll timer exiting");
                            break;
                        }
                    }
                    _ = stop_rx.changed() => {
                        break;
                    }
                }
            }
        });

        info!("Polling every {:?}", period);
        self.task = Some(PollTask { stop_tx, handle });
        true
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.stop_tx.send(true);
            task.handle.abort();
            debug!("Poll timer stopped");
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_ticks(rx: &mut mpsc::Receiver<Message>) -> usize {
        let mut n = 0;
        while let Ok(msg) = rx.try_recv() {
            assert!(matches!(msg, Message::PollTick));
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut poller = PollScheduler::new(Duration::from_secs(3));
        assert!(poller.start(tx));

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(count_ticks(&mut rx), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count_ticks(&mut rx), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(count_ticks(&mut rx), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_noop() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut poller = PollScheduler::new(Duration::from_secs(1));
        assert!(poller.start(tx.clone()));
        assert!(!poller.start(tx));

        tokio::time::sleep(Duration::from_millis(1_050)).await;
        assert_eq!(count_ticks(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_final() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut poller = PollScheduler::new(Duration::from_secs(1));
        poller.start(tx);
        poller.stop();
        poller.stop();
        assert!(!poller.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count_ticks(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let (tx, mut rx) = mpsc::channel(16);
        {
            let mut poller = PollScheduler::new(Duration::from_secs(1));
            poller.start(tx);
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count_ticks(&mut rx), 0);
    }

    #[test]
    fn test_period_is_clamped() {
        let poller = PollScheduler::new(Duration::from_millis(1));
        assert_eq!(poller.period(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let (tx, _rx) = mpsc::channel(16);
        let mut poller = PollScheduler::new(Duration::from_secs(1));
        assert!(poller.start(tx.clone()));
        poller.stop();
        assert!(poller.start(tx));
        assert!(poller.is_running());
    }
}
