//! Friction-decelerated rotor.
//!
//! Velocity decays geometrically, `v <- v * friction`, and rotation advances by
//! the decayed velocity each frame. Once velocity falls below `min_speed` it
//! snaps to zero and the rotor settles. The recurrence is part of the replay
//! contract: the same seed must always produce the same final rotation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::EngineError;

/// Tuning for the rotor. Construct with [`PhysicsConfig::new`] so a spin is
/// guaranteed to terminate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    friction: f64,
    min_speed: f64,
    min_impulse: f64,
    impulse_range: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            min_speed: DEFAULT_MIN_SPEED,
            min_impulse: DEFAULT_MIN_IMPULSE,
            impulse_range: DEFAULT_IMPULSE_RANGE,
        }
    }
}

impl PhysicsConfig {
    pub fn new(friction: f64, min_speed: f64, min_impulse: f64, impulse_range: f64) -> Result<Self, EngineError> {
        let all_finite = [friction, min_speed, min_impulse, impulse_range]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(EngineError::invalid("physics parameters must be finite"));
        }
        // friction < 1 and min_speed > 0 are what make every spin stop.
        if friction <= 0.0 || friction >= 1.0 {
            return Err(EngineError::invalid(format!(
                "friction must be in (0, 1), got {}",
                friction
            )));
        }
        if min_speed <= 0.0 {
            return Err(EngineError::invalid(format!(
                "min_speed must be positive, got {}",
                min_speed
            )));
        }
        if min_impulse <= 0.0 || impulse_range <= 0.0 {
            return Err(EngineError::invalid(format!(
                "impulse range [{}, {}] must be positive",
                min_impulse,
                min_impulse + impulse_range
            )));
        }
        Ok(Self {
            friction,
            min_speed,
            min_impulse,
            impulse_range,
        })
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    pub fn min_impulse(&self) -> f64 {
        self.min_impulse
    }

    pub fn impulse_range(&self) -> f64 {
        self.impulse_range
    }

    pub fn max_impulse(&self) -> f64 {
        self.min_impulse + self.impulse_range
    }

    /// Upper bound on the frames a spin can take, reached by the fastest impulse.
    pub fn max_steps(&self) -> u32 {
        let ratio = self.min_speed / self.max_impulse();
        if ratio >= 1.0 {
            return 1;
        }
        // Smallest n with v_max * f^n < min_speed, plus one for rounding.
        let steps = (ratio.ln() / self.friction.ln()).ceil() + 1.0;
        steps.min(u32::MAX as f64) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Spinning,
    Settled,
}

/// Rotor state. `rotation` is the accumulated angle and may exceed a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub rotation: f64,
    pub velocity: f64,
    pub phase: Phase,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            velocity: 0.0,
            phase: Phase::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing to advance.
    Idle,
    Moving(f64),
    /// Emitted once per spin with the final rotation.
    Settled(f64),
}

pub struct PhysicsSimulator<R> {
    config: PhysicsConfig,
    state: SimulationState,
    rng: R,
}

impl<R: Rng> PhysicsSimulator<R> {
    pub fn new(config: PhysicsConfig, rng: R) -> Self {
        Self {
            config,
            state: SimulationState::default(),
            rng,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.phase == Phase::Spinning
    }

    /// Draws an impulse from `[min_impulse, min_impulse + impulse_range)` and
    /// starts spinning from the current rotation. Returns the impulse.
    pub fn start(&mut self) -> Result<f64, EngineError> {
        if self.is_spinning() {
            return Err(EngineError::AlreadySpinning);
        }
        let impulse = self.config.min_impulse + self.rng.gen::<f64>() * self.config.impulse_range;
        self.state.velocity = impulse;
        self.state.phase = Phase::Spinning;
        Ok(impulse)
    }

    pub fn step(&mut self) -> StepOutcome {
        if !self.is_spinning() {
            return StepOutcome::Idle;
        }

        self.state.velocity *= self.config.friction;
        self.state.rotation += self.state.velocity;

        if self.state.velocity < self.config.min_speed {
            self.state.velocity = 0.0;
            self.state.phase = Phase::Settled;
            log::debug!("rotor settled at rotation {:.4}", self.state.rotation);
            return StepOutcome::Settled(self.state.rotation);
        }
        StepOutcome::Moving(self.state.rotation)
    }

    /// Back to rotation 0, at rest, whatever the current phase.
    pub fn reset(&mut self) {
        self.state = SimulationState::default();
    }
}
