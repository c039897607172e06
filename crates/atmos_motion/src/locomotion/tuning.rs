//! Tuning parameters for each controller variant.
//!
//! Speeds are in meters per second, times in seconds and gravity is a signed
//! acceleration along +Y (so it is negative). Defaults match the values the
//! characters shipped with.

use serde::{Deserialize, Serialize};

use crate::error::{require_negative, require_positive, LocomotionError, Result};

/// Tuning for the camera-relative third-person controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdPersonTuning {
    /// Top speed without sprint held
    pub walk_speed: f32,

    /// Top speed with sprint held
    pub run_speed: f32,

    /// Time constant for turning to face the movement direction
    pub turn_smooth_time: f32,

    /// Time constant for acceleration and deceleration
    pub speed_smooth_time: f32,

    /// Apex height of a jump from flat ground
    pub jump_height: f32,

    /// Vertical acceleration; a bit stronger than Earth feels snappier
    pub gravity: f32,
}

impl Default for ThirdPersonTuning {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 7.0,
            turn_smooth_time: 0.1,
            speed_smooth_time: 0.1,
            jump_height: 1.5,
            gravity: -25.0,
        }
    }
}

impl ThirdPersonTuning {
    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        require_positive("third_person.walk_speed", self.walk_speed)?;
        require_positive("third_person.run_speed", self.run_speed)?;
        require_positive("third_person.turn_smooth_time", self.turn_smooth_time)?;
        require_positive("third_person.speed_smooth_time", self.speed_smooth_time)?;
        require_positive("third_person.jump_height", self.jump_height)?;
        require_negative("third_person.gravity", self.gravity)?;

        if self.run_speed < self.walk_speed {
            return Err(LocomotionError::InvalidTuning {
                field: "third_person.run_speed",
                value: self.run_speed,
                reason: "must not be below walk_speed",
            });
        }

        Ok(())
    }
}

/// Which frame the simple controller reads its input axes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Axes map straight onto world X and Z
    WorldAxes,

    /// The body turns with horizontal look input and axes follow its yaw
    BodyYaw,
}

/// Tuning for the simple (non-camera-relative) controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleTuning {
    /// Speed without sprint held
    pub walk_speed: f32,

    /// Speed with sprint held; also the reference for the animation blend
    pub sprint_speed: f32,

    /// Vertical acceleration
    pub gravity: f32,

    /// Apex height of a jump from flat ground
    pub jump_height: f32,

    /// Degrees of body yaw per unit of horizontal look input
    pub look_sensitivity: f32,

    /// Input reference frame
    pub facing: Facing,
}

impl Default for SimpleTuning {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 8.0,
            gravity: -9.81,
            jump_height: 2.0,
            look_sensitivity: 2.0,
            facing: Facing::BodyYaw,
        }
    }
}

impl SimpleTuning {
    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        require_positive("simple.walk_speed", self.walk_speed)?;
        require_positive("simple.sprint_speed", self.sprint_speed)?;
        require_negative("simple.gravity", self.gravity)?;
        require_positive("simple.jump_height", self.jump_height)?;
        require_positive("simple.look_sensitivity", self.look_sensitivity)?;

        if self.sprint_speed < self.walk_speed {
            return Err(LocomotionError::InvalidTuning {
                field: "simple.sprint_speed",
                value: self.sprint_speed,
                reason: "must not be below walk_speed",
            });
        }

        Ok(())
    }
}

/// Tuning for the force-driven rolling body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceMoverTuning {
    /// Force applied per unit of axis input
    pub move_speed: f32,
}

impl Default for ForceMoverTuning {
    fn default() -> Self {
        Self { move_speed: 10.0 }
    }
}

impl ForceMoverTuning {
    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        require_positive("force_mover.move_speed", self.move_speed)
    }
}
