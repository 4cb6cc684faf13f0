use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::state::Armed;

/// The single recurring timer behind `Tick`
///
/// Follows whatever the active state armed: a new arming restarts it, no
/// arming leaves it silent.
pub struct TickTimer {
    armed: Option<Armed>,
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self {
            armed: None,
            interval: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.period)
    }

    /// Re-arm or disarm to match `armed`
    pub fn sync(&mut self, armed: Option<Armed>) {
        if armed == self.armed {
            return;
        }
        self.armed = armed;
        self.interval = armed.map(|armed| {
            // First tick one full period after arming, not immediately
            let mut interval = interval_at(Instant::now() + armed.period, armed.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
    }

    /// Wait for the next tick; never completes while disarmed
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(ms: u64, generation: u64) -> Option<Armed> {
        Some(Armed {
            period: Duration::from_millis(ms),
            generation,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_one_period() {
        let mut timer = TickTimer::new();
        timer.sync(armed(300, 1));

        let start = Instant::now();
        timer.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(300));

        timer.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_never_fires() {
        let mut timer = TickTimer::new();
        timer.sync(armed(100, 1));
        timer.sync(None);
        assert_eq!(timer.period(), None);

        let fired = tokio::time::timeout(Duration::from_secs(5), timer.tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_arming_keeps_phase() {
        let mut timer = TickTimer::new();
        timer.sync(armed(100, 1));
        tokio::time::advance(Duration::from_millis(60)).await;

        timer.sync(armed(100, 1));
        let start = Instant::now();
        timer.tick().await;
        assert!(start.elapsed() <= Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_restarts() {
        let mut timer = TickTimer::new();
        timer.sync(armed(100, 1));
        tokio::time::advance(Duration::from_millis(60)).await;

        timer.sync(armed(100, 2));
        let start = Instant::now();
        timer.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
