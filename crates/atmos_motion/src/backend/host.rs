//! # Host Seams
//!
//! Traits standing in for engine-provided primitives. A host engine adapts
//! its character-motion, rigid-body, animator, camera and cursor APIs to
//! these; the controllers receive them by value at construction.

use crate::foundation::math::Vec3;

/// Result of one call to [`MotionPrimitive::move_by`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied after collision resolution
    pub displacement: Vec3,
    /// Whether the body rests on walkable ground after the move
    pub grounded: bool,
}

/// # Motion Primitive
///
/// Collision-resolving kinematic mover, the equivalent of a character
/// controller component.
///
/// ## Contract
///
/// - `move_by` resolves collisions along `delta`, updates the body position
///   and reports what was actually achieved
/// - `is_grounded` reflects the most recent `move_by`
pub trait MotionPrimitive {
    /// Sweep the body by `delta` and return the resolved outcome
    fn move_by(&mut self, delta: Vec3) -> MoveOutcome;

    /// Whether the body rested on ground after its last move
    fn is_grounded(&self) -> bool;
}

/// Named-parameter animation interface. Write-only: nothing is read back.
pub trait AnimationSink {
    /// Set a float parameter immediately
    fn set_float(&mut self, name: &str, value: f32);

    /// Move a float parameter toward `value` over `damp_time` seconds.
    ///
    /// Sinks without their own damping just set the value.
    fn set_float_damped(&mut self, name: &str, value: f32, damp_time: f32, delta_time: f32) {
        let _ = (damp_time, delta_time);
        self.set_float(name, value);
    }

    /// Fire a one-shot trigger
    fn set_trigger(&mut self, name: &str);
}

/// A missing animator: every write is dropped
impl AnimationSink for () {
    fn set_float(&mut self, _name: &str, _value: f32) {}

    fn set_trigger(&mut self, _name: &str) {}
}

/// Dynamics body that accepts forces, integrated by the host physics step
pub trait ForceBody {
    /// Apply a force for the current physics step
    fn add_force(&mut self, force: Vec3);

    /// Close out one physics step.
    ///
    /// Bodies simulated by an engine ignore this; bodies the caller advances
    /// itself integrate the forces received since the previous step.
    fn end_step(&mut self, delta_time: f32) {
        let _ = delta_time;
    }
}

/// Source of the reference yaw for camera-relative movement
pub trait CameraRig {
    /// Camera yaw in degrees about +Y
    fn yaw_degrees(&self) -> f32;
}

/// Pointer capture modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Cursor visible and free to leave the window
    #[default]
    Free,
    /// Cursor hidden and locked to the window centre
    Locked,
}

/// Process-wide pointer state, touched only on activation and deactivation
pub trait CursorService {
    /// Switch the cursor mode
    fn set_cursor_mode(&mut self, mode: CursorMode);
}
