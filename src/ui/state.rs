//! UI state management

use std::time::Duration;

use bevy::prelude::*;

/// Landing page countdown before the start button is offered.
#[derive(Resource, Debug)]
pub struct LaunchSequence {
    timer: Timer,
    announced: bool,
}

impl LaunchSequence {
    pub fn new(delay: Duration) -> Self {
        Self {
            timer: Timer::new(delay, TimerMode::Once),
            announced: false,
        }
    }

    /// Advance the countdown; returns true exactly once, on the tick it completes.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        if self.timer.is_finished() && !self.announced {
            self.announced = true;
            return true;
        }
        false
    }

    pub fn is_ready(&self) -> bool {
        self.announced
    }

    /// Fraction of the countdown elapsed, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.timer.fraction()
    }
}
