//! Headless host implementations
//!
//! Minimal stand-ins for the engine primitives so controllers can be driven
//! without an engine: a kinematic body over an infinite flat floor, a point
//! mass for force-driven movers, a recording animator, a fixed camera and a
//! cursor state holder.

use std::collections::HashMap;

use super::host::{
    AnimationSink, CameraRig, CursorMode, CursorService, ForceBody, MotionPrimitive, MoveOutcome,
};
use crate::foundation::math::{utils, Vec3};

/// Distance above the floor still counted as touching it
pub const GROUND_SKIN: f32 = 1e-3;

/// Kinematic body over an infinite horizontal plane
#[derive(Debug, Clone)]
pub struct FlatGroundMotor {
    position: Vec3,
    ground_height: f32,
    grounded: bool,
}

impl FlatGroundMotor {
    /// Create a motor standing on a floor at `ground_height`
    pub fn new(ground_height: f32) -> Self {
        Self::at(Vec3::new(0.0, ground_height, 0.0), ground_height)
    }

    /// Create a motor at an arbitrary position; below-floor positions are lifted.
    /// A motor spawned on the floor reports grounded before its first move.
    pub fn at(position: Vec3, ground_height: f32) -> Self {
        let mut position = position;
        position.y = position.y.max(ground_height);
        Self {
            position,
            ground_height,
            grounded: position.y <= ground_height + GROUND_SKIN,
        }
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Height of the floor plane
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }
}

impl Default for FlatGroundMotor {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MotionPrimitive for FlatGroundMotor {
    fn move_by(&mut self, delta: Vec3) -> MoveOutcome {
        let mut next = self.position + delta;
        if next.y < self.ground_height {
            next.y = self.ground_height;
        }

        let displacement = next - self.position;
        self.position = next;
        self.grounded = delta.y <= 0.0 && next.y <= self.ground_height + GROUND_SKIN;

        MoveOutcome {
            displacement,
            grounded: self.grounded,
        }
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

/// Animator that records parameters and triggers, with its own damping
#[derive(Debug, Clone, Default)]
pub struct DampedAnimator {
    floats: HashMap<String, f32>,
    damp_velocities: HashMap<String, f32>,
    triggers: Vec<String>,
}

impl DampedAnimator {
    /// Create an empty animator
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a float parameter
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Triggers fired so far, in order
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Drain the recorded triggers
    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }
}

impl AnimationSink for DampedAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
        self.damp_velocities.remove(name);
    }

    fn set_float_damped(&mut self, name: &str, value: f32, damp_time: f32, delta_time: f32) {
        let current = self.floats.get(name).copied().unwrap_or(0.0);
        let velocity = self.damp_velocities.entry(name.to_string()).or_insert(0.0);
        let next = utils::smooth_damp(current, value, velocity, damp_time, f32::INFINITY, delta_time);
        self.floats.insert(name.to_string(), next);
    }

    fn set_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }
}

/// Point mass integrated with semi-implicit Euler
#[derive(Debug, Clone)]
pub struct PointMassBody {
    /// Mass in kilograms
    pub mass: f32,
    /// Current position
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Damping factor for velocity (0 = no damping)
    pub linear_damping: f32,
    pending_force: Vec3,
    forces_this_step: u32,
}

impl PointMassBody {
    /// Create a body at rest at the origin
    pub fn new(mass: f32) -> Self {
        Self {
            mass: mass.max(f32::EPSILON),
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            linear_damping: 0.0,
            pending_force: Vec3::zeros(),
            forces_this_step: 0,
        }
    }

    /// Set linear damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping.max(0.0);
        self
    }

    /// Force accumulated since the last integration
    pub fn pending_force(&self) -> Vec3 {
        self.pending_force
    }

    /// Number of `add_force` calls since the last integration
    pub fn forces_this_step(&self) -> u32 {
        self.forces_this_step
    }

    /// Advance one physics step and clear the force accumulator
    pub fn integrate(&mut self, delta_time: f32) {
        let acceleration = self.pending_force / self.mass;
        self.velocity += acceleration * delta_time;

        if self.linear_damping > 0.0 {
            self.velocity *= (1.0 - self.linear_damping * delta_time).max(0.0);
        }

        self.position += self.velocity * delta_time;
        self.pending_force = Vec3::zeros();
        self.forces_this_step = 0;
    }
}

impl ForceBody for PointMassBody {
    fn add_force(&mut self, force: Vec3) {
        self.pending_force += force;
        self.forces_this_step += 1;
    }

    fn end_step(&mut self, delta_time: f32) {
        self.integrate(delta_time);
    }
}

/// Camera with a settable yaw
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCamera {
    /// Yaw in degrees
    pub yaw: f32,
}

impl FixedCamera {
    /// Create a camera looking along the given yaw
    pub fn new(yaw: f32) -> Self {
        Self { yaw }
    }
}

impl CameraRig for FixedCamera {
    fn yaw_degrees(&self) -> f32 {
        self.yaw
    }
}

/// Records cursor mode changes
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    mode: CursorMode,
    transitions: u32,
}

impl CursorState {
    /// Create a free, visible cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Number of mode changes so far
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

impl CursorService for CursorState {
    fn set_cursor_mode(&mut self, mode: CursorMode) {
        if self.mode != mode {
            log::debug!("Cursor mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.transitions += 1;
        }
    }
}
