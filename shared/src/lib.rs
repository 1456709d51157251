//! Weighted spin engine and the wheel types shared between the server and clients.
//!
//! The engine is split the same way a spin flows: [`partition`] turns weighted
//! segments into angular slices, [`physics`] decelerates a rotor, [`resolver`]
//! reads the slice under the pointer and [`controller`] drives it frame by frame.

pub mod analytics;
pub mod constants;
pub mod controller;
pub mod error;
pub mod partition;
pub mod physics;
pub mod resolver;
pub mod shared_wheel_game;
pub mod validation;

pub use error::EngineError;
