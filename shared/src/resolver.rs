//! Reads the winning segment off a stopped wheel.
//!
//! The pointer is fixed at [`POINTER_ANGLE`] (three o'clock) and the wheel turns
//! clockwise by `rotation`, so the wheel-frame angle under the pointer is
//! `(pointer - rotation) mod FULL_TURN`.

use crate::partition::{Partition, FULL_TURN};
use crate::shared_wheel_game::Segment;

/// Where the pointer sits, in the wheel's unrotated frame.
pub const POINTER_ANGLE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub index: usize,
    pub segment: &'a Segment,
    pub pointer_angle: f64,
    /// True when no slice matched and the last segment was returned instead.
    pub fallback: bool,
}

/// Wheel-frame angle under a pointer at `pointer` after turning by `rotation`.
/// Always in `[0, FULL_TURN)` for finite input, including negative rotations.
pub fn pointer_angle(rotation: f64, pointer: f64) -> f64 {
    let angle = (pointer - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly FULL_TURN for tiny negative inputs.
    if angle >= FULL_TURN {
        0.0
    } else {
        angle
    }
}

/// Segment under the fixed pointer. Never fails: if no slice matches, which
/// only numeric trouble can cause, the last segment wins.
pub fn resolve(partition: &Partition, rotation: f64) -> Resolution<'_> {
    let angle = pointer_angle(rotation, POINTER_ANGLE);
    let slices = partition.slices();

    if let Some(index) = slices.iter().position(|slice| slice.contains(angle)) {
        return Resolution {
            index,
            segment: &slices[index].segment,
            pointer_angle: angle,
            fallback: false,
        };
    }

    log::warn!(
        "no slice contains pointer angle {} (rotation {}); falling back to last segment",
        angle,
        rotation
    );
    let index = slices.len() - 1;
    Resolution {
        index,
        segment: &slices[index].segment,
        pointer_angle: angle,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn partition(weights: &[f64]) -> Partition {
        let segments = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Segment::new(i.to_string(), format!("S{}", i), w, "#000"))
            .collect();
        Partition::new(segments).unwrap()
    }

    #[test]
    fn test_quarter_turn_reads_three_quarters() {
        let p = partition(&[1.0, 1.0]);
        let res = resolve(&p, FULL_TURN * 0.25);
        assert!((res.pointer_angle - FULL_TURN * 0.75).abs() < 1e-12);
        assert_eq!(res.segment.id, "1");
        assert!(!res.fallback);
    }

    #[test]
    fn test_full_turn_matches_zero() {
        let p = partition(&[1.0, 2.0, 1.0]);
        let at_zero = resolve(&p, 0.0);
        let at_full = resolve(&p, FULL_TURN);
        assert_eq!(at_zero.pointer_angle, 0.0);
        assert_eq!(at_full.pointer_angle, 0.0);
        assert_eq!(at_zero.index, 0);
        assert_eq!(at_full.index, 0);
    }

    #[test]
    fn test_small_rotation_lands_in_last_slice() {
        // Turning clockwise a little brings the end of the wheel under the pointer.
        let p = partition(&[1.0, 2.0, 1.0]);
        assert_eq!(resolve(&p, 0.1).index, 2);
    }

    #[test]
    fn test_negative_rotation_wraps() {
        let p = partition(&[1.0, 1.0]);
        let res = resolve(&p, -FULL_TURN * 0.25);
        assert!((res.pointer_angle - FULL_TURN * 0.25).abs() < 1e-12);
        assert_eq!(res.index, 0);
        assert_eq!(resolve(&p, -1e-300).pointer_angle, 0.0);
    }

    #[test]
    fn test_non_finite_rotation_falls_back_to_last() {
        let p = partition(&[1.0, 1.0, 1.0]);
        let res = resolve(&p, f64::NAN);
        assert!(res.fallback);
        assert_eq!(res.index, 2);
    }

    #[test]
    fn test_pointer_offset_shifts_reading() {
        assert!((pointer_angle(0.0, FULL_TURN * 0.75) - FULL_TURN * 0.75).abs() < 1e-12);
        assert!((pointer_angle(FULL_TURN * 0.25, FULL_TURN * 0.75) - FULL_TURN * 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_every_rotation_resolves_to_one_slice(
            weights in prop::collection::vec(0.01f64..100.0, 1..20),
            rotation in -1.0e6f64..1.0e6,
        ) {
            let p = partition(&weights);
            let first = resolve(&p, rotation);
            prop_assert!(!first.fallback);
            prop_assert!(first.pointer_angle >= 0.0 && first.pointer_angle < FULL_TURN);

            let matches = p.slices().iter().filter(|s| s.contains(first.pointer_angle)).count();
            prop_assert_eq!(matches, 1);

            let second = resolve(&p, rotation);
            prop_assert_eq!(first, second);
        }
    }
}
