//! # Atmos Motion
//!
//! Frame-driven character locomotion for a host game engine.
//!
//! ## Features
//!
//! - **Third-person controller**: camera-relative movement with smoothed turning and speed
//! - **Simple controller**: world-axis or body-yaw movement at fixed walk and sprint speeds
//! - **Force mover**: planar force on a dynamics body once per physics step
//! - **Injected host seams**: motion, animation, camera and cursor behind small traits
//! - **Headless host**: flat ground, point mass and recording animator for tests and tools
//! - **Settings files**: every tuning value loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atmos_motion::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     atmos_motion::foundation::logging::init();
//!     let settings = Settings::load("settings.toml")?;
//!
//!     let mut hero = ThirdPersonController::new(
//!         settings.third_person.clone(),
//!         FlatGroundMotor::new(0.0),
//!         DampedAnimator::new(),
//!         Some(FixedCamera::new(0.0)),
//!     );
//!     let mut cursor = CursorState::new();
//!     let mut driver = Driver::new(&settings.driver);
//!
//!     driver.activate(&mut [&mut hero], &mut cursor);
//!     for _ in 0..60 {
//!         driver.frame(1.0 / 60.0, &InputFrame::from_axes(0.0, 1.0), &mut [&mut hero]);
//!     }
//!     driver.deactivate(&mut [&mut hero], &mut cursor);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod error;
pub mod config;
pub mod input;
pub mod backend;
pub mod locomotion;
pub mod driver;

pub use driver::{Driver, FrameReport};
pub use error::{LocomotionError, Result};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        Driver, FrameReport, LocomotionError,
        backend::{
            AnimationSink, CameraRig, CursorMode, CursorService, ForceBody, MotionPrimitive,
            MoveOutcome,
            headless::{CursorState, DampedAnimator, FixedCamera, FlatGroundMotor, PointMassBody},
        },
        config::{Config, DriverSettings, Settings},
        foundation::math::{Vec2, Vec3},
        input::{InputFrame, InputManager, KeyCode},
        locomotion::{
            Actuation, Facing, ForceMover, ForceMoverTuning, Locomotor, MotionCommand,
            SimpleController, SimpleTuning, ThirdPersonController, ThirdPersonTuning,
            TickSchedule,
        },
    };
}
