//! Camera-relative third-person controller.
//!
//! The body turns smoothly toward the input direction as seen from the
//! camera, and always moves along the direction it currently faces. Speed
//! ramps toward walk or run speed scaled by how far the stick is pushed.

use crate::backend::{AnimationSink, CameraRig, CursorService, MotionPrimitive};
use crate::error::{LocomotionError, Result};
use crate::foundation::math::{utils, Vec2, Vec3};
use crate::input::InputFrame;

use super::command::{speed_percent, MotionCommand, JUMP_TRIGGER, SPEED_PERCENT_PARAM};
use super::lifecycle::{Actuation, Locomotor};
use super::state::{LocomotionState, MOVE_THRESHOLD};
use super::tuning::ThirdPersonTuning;

/// Advance the camera-relative mapper by one frame.
///
/// Reads the raw axes, so digital input responds immediately; all the
/// smoothing happens on facing and speed instead.
pub fn step(
    state: &mut LocomotionState,
    tuning: &ThirdPersonTuning,
    input: &InputFrame,
    grounded: bool,
    camera_yaw: f32,
    delta_time: f32,
) -> MotionCommand {
    let axes = utils::clamp_magnitude(input.raw_axes, 1.0);
    let magnitude = axes.magnitude();
    let has_input = magnitude >= MOVE_THRESHOLD;

    if has_input {
        let target_yaw = utils::rad_to_deg(axes.x.atan2(axes.y)) + camera_yaw;
        let yaw = utils::smooth_damp_angle(
            state.facing_yaw,
            target_yaw,
            &mut state.turn_velocity,
            tuning.turn_smooth_time,
            f32::INFINITY,
            delta_time,
        );
        state.facing_yaw = utils::repeat(yaw, 360.0);
        state.move_direction = utils::yaw_forward(state.facing_yaw);
    } else if grounded {
        state.move_direction = Vec3::zeros();
    }

    let top_speed = if input.sprint_held { tuning.run_speed } else { tuning.walk_speed };
    let speed_goal = if has_input { top_speed * magnitude } else { 0.0 };
    state.current_speed = utils::smooth_damp(
        state.current_speed,
        speed_goal,
        &mut state.speed_velocity,
        tuning.speed_smooth_time,
        f32::INFINITY,
        delta_time,
    )
    .max(0.0);

    let horizontal = state.move_direction * state.current_speed;
    state.horizontal_velocity = Vec2::new(horizontal.x, horizontal.z);

    let events = state.step_vertical(
        grounded,
        input.jump_pressed,
        tuning.gravity,
        tuning.jump_height,
        delta_time,
    );

    // Read back after the vertical step, which has scrubbed non-finite values
    let velocity = Vec3::new(
        state.horizontal_velocity.x,
        state.vertical_velocity,
        state.horizontal_velocity.y,
    );
    MotionCommand {
        jump_triggered: events.jumped,
        landed: events.landed,
        facing_yaw: Some(state.facing_yaw),
        ..MotionCommand::from_velocity(velocity, delta_time)
    }
    .with_speed_percent(speed_percent(state.current_speed, tuning.run_speed))
}

/// Third-person controller bound to its host primitives
pub struct ThirdPersonController<M, A, C> {
    tuning: ThirdPersonTuning,
    state: LocomotionState,
    motor: M,
    animator: A,
    camera: Option<C>,
    degraded: bool,
}

impl<M, A, C> ThirdPersonController<M, A, C>
where
    M: MotionPrimitive,
    A: AnimationSink,
    C: CameraRig,
{
    /// Create a controller; `camera` is the reference for camera-relative input
    pub fn new(tuning: ThirdPersonTuning, motor: M, animator: A, camera: Option<C>) -> Self {
        Self {
            tuning,
            state: LocomotionState::default(),
            motor,
            animator,
            camera,
            degraded: false,
        }
    }

    /// Current locomotion state
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Active tuning
    pub fn tuning(&self) -> &ThirdPersonTuning {
        &self.tuning
    }

    /// Motion primitive
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Animation sink
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Camera, for hosts that steer it between frames
    pub fn camera_mut(&mut self) -> Option<&mut C> {
        self.camera.as_mut()
    }

    /// Whether activation failed and ticks are being skipped
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Run one frame: map input, move, animate
    pub fn update(&mut self, input: &InputFrame, delta_time: f32) -> Option<MotionCommand> {
        if self.degraded {
            return None;
        }
        let camera_yaw = self.camera.as_ref()?.yaw_degrees();

        let grounded = self.motor.is_grounded();
        let command = step(
            &mut self.state,
            &self.tuning,
            input,
            grounded,
            camera_yaw,
            delta_time,
        );

        self.motor.move_by(command.delta);

        self.animator.set_float_damped(
            SPEED_PERCENT_PARAM,
            command.speed_percent,
            self.tuning.speed_smooth_time,
            delta_time,
        );
        if command.jump_triggered {
            self.animator.set_trigger(JUMP_TRIGGER);
        }

        log::trace!(
            "third-person: delta={:?} speed={:.2} yaw={:.1}",
            command.delta,
            self.state.current_speed,
            self.state.facing_yaw
        );

        Some(command)
    }
}

impl<M, A, C> Locomotor for ThirdPersonController<M, A, C>
where
    M: MotionPrimitive,
    A: AnimationSink,
    C: CameraRig,
{
    fn name(&self) -> &'static str {
        "third-person"
    }

    fn init(&mut self, _cursor: &mut dyn CursorService) -> Result<()> {
        if let Err(err) = self.tuning.validate() {
            self.degraded = true;
            return Err(err);
        }

        if self.camera.is_none() {
            log::error!("Third-person controller requires a main camera; movement disabled");
            self.degraded = true;
            return Err(LocomotionError::MissingReference("main camera"));
        }

        self.state.grounded = self.motor.is_grounded();
        self.degraded = false;
        log::info!("Third-person controller activated");
        Ok(())
    }

    fn tick(&mut self, input: &InputFrame, delta_time: f32) -> Actuation {
        self.update(input, delta_time)
            .map_or(Actuation::Inactive, Actuation::Motion)
    }
}
