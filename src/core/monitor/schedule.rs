use crate::config::PollingConfig;
use std::time::Duration;

/// Delays between status polls
///
/// The first poll waits `first_delay` after submission; every later poll
/// waits `interval` after the previous response was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    first_delay: Duration,
    interval: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(4000))
    }
}

impl PollSchedule {
    pub fn new(first_delay: Duration, interval: Duration) -> Self {
        Self {
            first_delay,
            interval,
        }
    }

    /// Same delay before every poll
    pub fn flat(interval: Duration) -> Self {
        Self::new(interval, interval)
    }

    /// Batch upload schedule
    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.first_delay(), config.interval())
    }

    /// CSV generation schedule
    pub fn csv_generation(config: &PollingConfig) -> Self {
        Self::flat(config.csvgen_interval())
    }

    /// Delay before poll number `polls_done + 1`
    pub fn delay_before(&self, polls_done: u32) -> Duration {
        if polls_done == 0 {
            self.first_delay
        } else {
            self.interval
        }
    }
}
