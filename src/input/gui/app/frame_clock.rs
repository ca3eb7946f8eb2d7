use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames averaged for the FPS readout.
pub const FPS_WINDOW: usize = 120;

/// Rolling frame-rate estimate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    durations: VecDeque<Duration>,
    total: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last_tick: None,
            durations: VecDeque::with_capacity(FPS_WINDOW),
            total: Duration::ZERO,
        }
    }
}

impl FrameClock {
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last_tick.replace(now) {
            let duration = now.saturating_duration_since(last);
            if self.durations.len() == FPS_WINDOW {
                if let Some(oldest) = self.durations.pop_front() {
                    self.total -= oldest;
                }
            }
            self.durations.push_back(duration);
            self.total += duration;
        }
    }

    /// Zero until two frames have been seen.
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.durations.is_empty() || self.total.is_zero() {
            return 0.0;
        }

        self.durations.len() as f64 / self.total.as_secs_f64()
    }
}
