//! Planet transition state machine
//!
//! `Idle(p)` accepts a request for any other planet and moves to
//! `Transitioning(p, target)`. While transitioning every request is dropped;
//! the transition resolves to `Idle(target)` once the clock passes the
//! deadline armed at acceptance. The clock is external (`now` is the elapsed
//! time of the app) so the machine never reads ambient time itself.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::PlanetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JourneyPhase {
    Idle(PlanetId),
    Transitioning { from: PlanetId, to: PlanetId },
}

/// Why a request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestRejected {
    /// The target is the planet already shown.
    AlreadyActive(PlanetId),
    /// A transition is in flight; requests are not queued.
    InFlight { from: PlanetId, to: PlanetId },
    /// Scrolling past either end of the planet order.
    EndOfOrder(PlanetId),
    /// Wheel event without vertical movement.
    NoScroll,
}

/// An accepted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionStarted {
    pub from: PlanetId,
    pub to: PlanetId,
    pub deadline: Duration,
}

/// Owns the active planet and the single in-flight transition of a journey view.
#[derive(Resource, Debug)]
pub struct TransitionController {
    phase: JourneyPhase,
    duration: Duration,
    deadline: Option<Duration>,
}

impl TransitionController {
    /// Fresh controller in `Idle(earth)`.
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: JourneyPhase::Idle(PlanetId::Earth),
            duration,
            deadline: None,
        }
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    /// Pending resolution time, `None` when idle.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// The planet the scene shows. During a transition this is still the origin.
    pub fn active_planet(&self) -> PlanetId {
        match self.phase {
            JourneyPhase::Idle(planet) => planet,
            JourneyPhase::Transitioning { from, .. } => from,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, JourneyPhase::Transitioning { .. })
    }

    /// Ask to travel to `target`, accepted at `now`.
    pub fn request(
        &mut self,
        target: PlanetId,
        now: Duration,
    ) -> Result<TransitionStarted, RequestRejected> {
        let current = match self.phase {
            JourneyPhase::Transitioning { from, to } => {
                return Err(RequestRejected::InFlight { from, to });
            }
            JourneyPhase::Idle(current) => current,
        };
        if target == current {
            return Err(RequestRejected::AlreadyActive(current));
        }

        let deadline = now + self.duration;
        self.phase = JourneyPhase::Transitioning {
            from: current,
            to: target,
        };
        self.deadline = Some(deadline);
        Ok(TransitionStarted {
            from: current,
            to: target,
            deadline,
        })
    }

    /// Translate a wheel delta into a request.
    ///
    /// `delta_y` follows the browser convention: positive scrolls down toward
    /// the next planet, negative scrolls up toward the previous one.
    pub fn scroll(
        &mut self,
        delta_y: f32,
        now: Duration,
    ) -> Result<TransitionStarted, RequestRejected> {
        if let JourneyPhase::Transitioning { from, to } = self.phase {
            return Err(RequestRejected::InFlight { from, to });
        }
        let current = self.active_planet();
        let target = if delta_y > 0.0 {
            current.next()
        } else if delta_y < 0.0 {
            current.previous()
        } else {
            return Err(RequestRejected::NoScroll);
        };
        match target {
            Some(target) => self.request(target, now),
            None => Err(RequestRejected::EndOfOrder(current)),
        }
    }

    /// Resolve the transition once `now` reaches the deadline.
    ///
    /// Returns the planet arrived at, exactly once per transition.
    pub fn update(&mut self, now: Duration) -> Option<PlanetId> {
        let JourneyPhase::Transitioning { to, .. } = self.phase else {
            return None;
        };
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.phase = JourneyPhase::Idle(to);
        self.deadline = None;
        Some(to)
    }
}
