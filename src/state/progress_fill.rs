//! Eased fill for the application progress bar

use std::time::{Duration, Instant};

/// Animates the bar from its last drawn value to the form's current progress
#[derive(Debug, Clone)]
pub struct ProgressFill {
    from: f32,
    target: u8,
    started: Instant,
}

impl ProgressFill {
    const DURATION: Duration = Duration::from_millis(300);

    pub fn new() -> Self {
        Self {
            from: 0.0,
            target: 0,
            started: Instant::now(),
        }
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    /// Point the animation at a new percentage, starting from wherever the
    /// bar currently is
    pub fn retarget(&mut self, target: u8) {
        if target == self.target {
            return;
        }
        let now = Instant::now();
        self.from = self.value_at(now);
        self.target = target.min(100);
        self.started = now;
    }

    /// Percentage to draw right now
    pub fn value(&self) -> f32 {
        self.value_at(Instant::now())
    }

    fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f32() / Self::DURATION.as_secs_f32()).min(1.0);
        let eased = simple_easing::cubic_out(t);
        self.from + (self.target as f32 - self.from) * eased
    }

    pub fn is_animating(&self) -> bool {
        self.started.elapsed() < Self::DURATION
    }
}

impl Default for ProgressFill {
    fn default() -> Self {
        Self::new()
    }
}
