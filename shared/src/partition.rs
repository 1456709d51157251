//! Maps an ordered list of weighted segments onto one full turn.
//!
//! Slices are laid out clockwise from angle 0 in list order. Each slice spans
//! `weight / total * FULL_TURN` and is half-open, `[start, end)`. The end of one
//! slice is stored as the start of the next and the last slice ends exactly at
//! [`FULL_TURN`], so every angle in `[0, FULL_TURN)` falls in exactly one slice.

use serde::Serialize;

use crate::error::EngineError;
use crate::shared_wheel_game::Segment;

/// One full rotation, in radians.
pub const FULL_TURN: f64 = std::f64::consts::TAU;

/// A segment together with the angular interval it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub segment: Segment,
    pub start: f64,
    pub end: f64,
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Half-open containment: a boundary belongs to the slice that starts there.
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }

    /// Centre of the slice, where a renderer places the label.
    pub fn mid_angle(&self) -> f64 {
        self.start + self.span() / 2.0
    }
}

/// Immutable angular layout of a wheel. Rebuild it whenever the segments change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    slices: Vec<Slice>,
    total_weight: f64,
}

impl Partition {
    pub fn new(segments: Vec<Segment>) -> Result<Self, EngineError> {
        if segments.is_empty() {
            return Err(EngineError::invalid("a wheel needs at least one segment"));
        }
        for segment in &segments {
            if !segment.weight.is_finite() || segment.weight <= 0.0 {
                return Err(EngineError::invalid(format!(
                    "segment '{}' has non-positive weight {}",
                    segment.label, segment.weight
                )));
            }
        }

        let total_weight: f64 = segments.iter().map(|s| s.weight).sum();
        if !total_weight.is_finite() || total_weight <= 0.0 {
            return Err(EngineError::invalid(format!(
                "total weight must be positive, got {}",
                total_weight
            )));
        }

        let last = segments.len() - 1;
        let mut start = 0.0;
        let mut slices = Vec::with_capacity(segments.len());
        for (index, segment) in segments.into_iter().enumerate() {
            let end = if index == last {
                FULL_TURN
            } else {
                // Clamp so rounding can never push a slice past the full turn.
                (start + segment.weight / total_weight * FULL_TURN).min(FULL_TURN)
            };
            slices.push(Slice { segment, start, end });
            start = end;
        }

        Ok(Self { slices, total_weight })
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.slices.iter().map(|slice| &slice.segment)
    }

    /// Probability that a spin lands on the slice at `index`.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.slices
            .get(index)
            .map(|slice| slice.segment.weight / self.total_weight)
    }
}
