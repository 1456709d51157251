use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::constants::MAX_REPLAY_SEED;
use shared::controller::{ManualScheduler, SpinController, SpinObserver};
use shared::partition::Partition;
use shared::physics::PhysicsConfig;
use shared::shared_wheel_game::{Segment, SpinOutcome, SpinRequest, SpinResponse};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::wheel_service::get_wheel;
use crate::AppState;

/// Stands in for the render surface on the server: counts frames and keeps the winner.
#[derive(Default)]
struct FrameCounter {
    frames: u32,
    winner: Option<Segment>,
    final_rotation: f64,
}

impl SpinObserver for FrameCounter {
    fn on_render(&mut self, _rotation: f64, _partition: &Partition) {
        self.frames += 1;
    }

    fn on_complete(&mut self, winner: &Segment, rotation: f64) {
        self.winner = Some(winner.clone());
        self.final_rotation = rotation;
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessSpin {
    pub winner: Segment,
    pub seed: u64,
    pub impulse: f64,
    pub final_rotation: f64,
    pub steps: u32,
}

/// Runs one full spin from rest without a display. The same segments, physics
/// and seed always give the same result, so a client can replay it frame by frame.
pub fn run_headless_spin(
    segments: Vec<Segment>,
    physics: PhysicsConfig,
    seed: u64,
) -> Result<HeadlessSpin, ApiError> {
    let mut controller = SpinController::new(
        segments,
        physics,
        StdRng::seed_from_u64(seed),
        ManualScheduler::new(),
        FrameCounter::default(),
    )?;

    if !controller.spin() {
        return Err(ApiError::Internal("fresh wheel refused to spin".to_string()));
    }
    let impulse = controller.state().velocity;
    if controller.run_to_completion().is_none() {
        return Err(ApiError::Internal(format!("spin with seed {} did not settle", seed)));
    }

    let counter = controller.into_observer();
    let winner = counter
        .winner
        .ok_or_else(|| ApiError::Internal("spin settled without a winner".to_string()))?;

    Ok(HeadlessSpin {
        winner,
        seed,
        impulse,
        final_rotation: counter.final_rotation,
        steps: counter.frames,
    })
}

/// Server-authoritative spin: picks (or replays) a seed, spins, records the outcome.
pub async fn spin_wheel(state: &AppState, wheel_id: Uuid, request: SpinRequest) -> Result<SpinResponse, ApiError> {
    let wheel = get_wheel(state, wheel_id).await?;
    let seed = match request.seed {
        Some(seed) if seed > MAX_REPLAY_SEED => {
            return Err(ApiError::Validation(format!(
                "seed {} is above the replayable maximum {}",
                seed, MAX_REPLAY_SEED
            )))
        }
        Some(seed) => seed,
        None => rand::thread_rng().gen_range(0..=MAX_REPLAY_SEED),
    };

    let spin = run_headless_spin(wheel.segments.clone(), state.physics, seed)?;
    let outcome = SpinOutcome::new(wheel.id, &spin.winner, Utc::now());
    state.store.append_outcome(&outcome).await?;

    tracing::info!(
        "🎡 WHEEL SPIN: '{}' landed on '{}' after {} frames (seed {})",
        wheel.title,
        spin.winner.label,
        spin.steps,
        seed
    );

    Ok(SpinResponse {
        outcome,
        winner: spin.winner,
        seed: spin.seed,
        impulse: spin.impulse,
        final_rotation: spin.final_rotation,
        steps: spin.steps,
    })
}
