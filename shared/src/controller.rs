//! Frame-driven spin state machine.
//!
//! The controller never loops on its own. Each accepted spin asks the
//! [`FrameScheduler`] for a frame and the host calls [`SpinController::on_frame`]
//! with the token when that frame fires. Only the most recently requested token
//! is honoured, so a frame scheduled before [`SpinController::reset`] can never
//! advance the wheel afterwards, even if the host delivers it anyway.

use std::collections::VecDeque;

use rand::Rng;

use crate::error::EngineError;
use crate::partition::Partition;
use crate::physics::{PhysicsConfig, PhysicsSimulator, SimulationState, StepOutcome};
use crate::resolver::resolve;
use crate::shared_wheel_game::Segment;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// "Run me again before the next redraw", with cancellation.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Render surface and completion callback. Receives state, never mutates the engine.
pub trait SpinObserver {
    fn on_render(&mut self, rotation: f64, partition: &Partition);
    fn on_complete(&mut self, winner: &Segment, rotation: f64);
}

/// FIFO of pending frames for hosts without a display loop: the server and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_frame(&mut self) -> Option<FrameToken> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending.push_back(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|pending| *pending != token);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The token was cancelled or superseded; nothing happened.
    Stale,
    Rendered,
    /// The wheel settled and the completion callback fired.
    Completed,
}

pub struct SpinController<R, S, O> {
    simulator: PhysicsSimulator<R>,
    partition: Partition,
    scheduler: S,
    observer: O,
    pending: Option<FrameToken>,
    winner: Option<usize>,
}

impl<R, S, O> SpinController<R, S, O>
where
    R: Rng,
    S: FrameScheduler,
    O: SpinObserver,
{
    pub fn new(
        segments: Vec<Segment>,
        config: PhysicsConfig,
        rng: R,
        scheduler: S,
        observer: O,
    ) -> Result<Self, EngineError> {
        let partition = Partition::new(segments)?;
        Ok(Self {
            simulator: PhysicsSimulator::new(config, rng),
            partition,
            scheduler,
            observer,
            pending: None,
            winner: None,
        })
    }

    /// Starts a spin. Returns false, without side effects, when one is already running.
    pub fn spin(&mut self) -> bool {
        match self.simulator.start() {
            Ok(impulse) => {
                log::debug!("spin accepted with impulse {:.4}", impulse);
                self.winner = None;
                self.pending = Some(self.scheduler.request_frame());
                true
            }
            Err(EngineError::AlreadySpinning) => {
                log::debug!("spin ignored, wheel is already spinning");
                false
            }
            Err(e) => {
                log::warn!("spin rejected: {}", e);
                false
            }
        }
    }

    /// Advances one frame. Must be called with the token the scheduler fired.
    pub fn on_frame(&mut self, token: FrameToken) -> FrameOutcome {
        if self.pending != Some(token) {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        match self.simulator.step() {
            StepOutcome::Idle => FrameOutcome::Stale,
            StepOutcome::Moving(rotation) => {
                self.observer.on_render(rotation, &self.partition);
                self.pending = Some(self.scheduler.request_frame());
                FrameOutcome::Rendered
            }
            StepOutcome::Settled(rotation) => {
                self.observer.on_render(rotation, &self.partition);
                let resolution = resolve(&self.partition, rotation);
                log::debug!(
                    "spin settled on '{}' at pointer angle {:.4}",
                    resolution.segment.label,
                    resolution.pointer_angle
                );
                self.winner = Some(resolution.index);
                self.observer.on_complete(resolution.segment, rotation);
                FrameOutcome::Completed
            }
        }
    }

    /// Cancels any pending frame and returns to rotation 0 at rest. Safe in any state.
    pub fn reset(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
        self.simulator.reset();
        self.winner = None;
        self.observer.on_render(self.simulator.state().rotation, &self.partition);
    }

    /// Swaps in a new wheel. The simulation starts fresh, as when a wheel is loaded.
    pub fn load_segments(&mut self, segments: Vec<Segment>) -> Result<(), EngineError> {
        let partition = Partition::new(segments)?;
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
        self.partition = partition;
        self.simulator.reset();
        self.winner = None;
        Ok(())
    }

    pub fn is_spinning(&self) -> bool {
        self.simulator.is_spinning()
    }

    pub fn winner(&self) -> Option<&Segment> {
        self.winner
            .and_then(|index| self.partition.slices().get(index))
            .map(|slice| &slice.segment)
    }

    pub fn state(&self) -> &SimulationState {
        self.simulator.state()
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn config(&self) -> &PhysicsConfig {
        self.simulator.config()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<R, O> SpinController<R, ManualScheduler, O>
where
    R: Rng,
    O: SpinObserver,
{
    /// Fires the next queued frame, if any.
    pub fn pump(&mut self) -> Option<FrameOutcome> {
        let token = self.scheduler.next_frame()?;
        Some(self.on_frame(token))
    }

    /// Drives the current spin to its winner. Returns `None` if no spin is
    /// running or the frame budget from [`PhysicsConfig::max_steps`] runs out.
    pub fn run_to_completion(&mut self) -> Option<&Segment> {
        let budget = self.config().max_steps();
        for _ in 0..budget {
            match self.pump()? {
                FrameOutcome::Completed => return self.winner(),
                FrameOutcome::Rendered | FrameOutcome::Stale => {}
            }
        }
        log::warn!("spin did not settle within {} frames", budget);
        None
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }
}
