//! # Locomotion
//!
//! Per-frame input-to-motion mappers and the controllers that bind them to
//! host primitives.
//!
//! Each variant is split in two: a pure `step` function over
//! ([`LocomotionState`], tuning, input, `dt`) that returns a [`MotionCommand`],
//! and a controller that owns the state plus its injected collaborators and
//! implements [`Locomotor`] so a driver can run it.
//!
//! - [`third_person`]: camera-relative, smoothed turning and speed
//! - [`simple`]: world-axis or body-yaw movement at fixed speeds
//! - [`force_mover`]: planar force on a dynamics body, per physics step

pub mod command;
pub mod force_mover;
pub mod lifecycle;
pub mod simple;
pub mod state;
pub mod third_person;
pub mod tuning;

#[cfg(test)]
mod tests;

pub use command::{MotionCommand, JUMP_TRIGGER, SPEED_PERCENT_PARAM};
pub use force_mover::ForceMover;
pub use lifecycle::{Actuation, Locomotor, TickSchedule};
pub use simple::SimpleController;
pub use state::{launch_velocity, LocomotionState, GROUND_BIAS, MOVE_THRESHOLD};
pub use third_person::ThirdPersonController;
pub use tuning::{Facing, ForceMoverTuning, SimpleTuning, ThirdPersonTuning};
