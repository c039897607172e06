//! Simple controller: fixed speeds, no camera.
//!
//! Axes are read either straight in world space or relative to the body yaw,
//! which turns with horizontal look input. There is no acceleration; the body
//! moves at walk or sprint speed as soon as input crosses the threshold.

use crate::backend::{AnimationSink, CursorMode, CursorService, MotionPrimitive};
use crate::error::Result;
use crate::foundation::math::{utils, Vec2, Vec3};
use crate::input::InputFrame;

use super::command::{speed_percent, MotionCommand, JUMP_TRIGGER, SPEED_PERCENT_PARAM};
use super::lifecycle::{Actuation, Locomotor};
use super::state::{LocomotionState, MOVE_THRESHOLD};
use super::tuning::{Facing, SimpleTuning};

/// Advance the simple mapper by one frame.
pub fn step(
    state: &mut LocomotionState,
    tuning: &SimpleTuning,
    input: &InputFrame,
    grounded: bool,
    delta_time: f32,
) -> MotionCommand {
    if tuning.facing == Facing::BodyYaw {
        let turned = state.facing_yaw + input.look_delta * tuning.look_sensitivity;
        state.facing_yaw = utils::repeat(turned, 360.0);
    }

    let axes = input.smoothed_axes;
    let desired =
        utils::yaw_forward(state.facing_yaw) * axes.y + utils::yaw_right(state.facing_yaw) * axes.x;

    if desired.magnitude() >= MOVE_THRESHOLD {
        state.move_direction = desired.normalize();
    } else if grounded {
        state.move_direction = Vec3::zeros();
    }

    let speed = if input.sprint_held { tuning.sprint_speed } else { tuning.walk_speed };
    let horizontal = state.move_direction * speed;
    state.horizontal_velocity = Vec2::new(horizontal.x, horizontal.z);
    state.current_speed = state.horizontal_velocity.magnitude();

    let events = state.step_vertical(
        grounded,
        input.jump_pressed,
        tuning.gravity,
        tuning.jump_height,
        delta_time,
    );

    let velocity = Vec3::new(
        state.horizontal_velocity.x,
        state.vertical_velocity,
        state.horizontal_velocity.y,
    );
    let facing_yaw = match tuning.facing {
        Facing::BodyYaw => Some(state.facing_yaw),
        Facing::WorldAxes => None,
    };

    MotionCommand {
        jump_triggered: events.jumped,
        landed: events.landed,
        facing_yaw,
        ..MotionCommand::from_velocity(velocity, delta_time)
    }
    .with_speed_percent(speed_percent(state.current_speed, tuning.sprint_speed))
}

/// Simple controller bound to its host primitives
pub struct SimpleController<M, A> {
    tuning: SimpleTuning,
    state: LocomotionState,
    motor: M,
    animator: A,
    degraded: bool,
}

impl<M, A> SimpleController<M, A>
where
    M: MotionPrimitive,
    A: AnimationSink,
{
    /// Create a controller facing yaw 0
    pub fn new(tuning: SimpleTuning, motor: M, animator: A) -> Self {
        Self {
            tuning,
            state: LocomotionState::default(),
            motor,
            animator,
            degraded: false,
        }
    }

    /// Current locomotion state
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Active tuning
    pub fn tuning(&self) -> &SimpleTuning {
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

    /// Whether activation failed and ticks are being skipped
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Run one frame: map input, move, then report the achieved speed
    pub fn update(&mut self, input: &InputFrame, delta_time: f32) -> Option<MotionCommand> {
        if self.degraded {
            return None;
        }

        let grounded = self.motor.is_grounded();
        let mut command = step(&mut self.state, &self.tuning, input, grounded, delta_time);

        let outcome = self.motor.move_by(command.delta);

        // Blend on what the collision pass let through, not what was asked for
        if delta_time > 0.0 {
            let achieved = outcome.displacement.x.hypot(outcome.displacement.z) / delta_time;
            command = command.with_speed_percent(speed_percent(achieved, self.tuning.sprint_speed));
        }

        self.animator.set_float(SPEED_PERCENT_PARAM, command.speed_percent);
        if command.jump_triggered {
            self.animator.set_trigger(JUMP_TRIGGER);
        }

        log::trace!(
            "simple: delta={:?} achieved={:?} yaw={:.1}",
            command.delta,
            outcome.displacement,
            self.state.facing_yaw
        );

        Some(command)
    }
}

impl<M, A> Locomotor for SimpleController<M, A>
where
    M: MotionPrimitive,
    A: AnimationSink,
{
    fn name(&self) -> &'static str {
        "simple"
    }

    fn init(&mut self, cursor: &mut dyn CursorService) -> Result<()> {
        if let Err(err) = self.tuning.validate() {
            self.degraded = true;
            return Err(err);
        }

        if self.tuning.facing == Facing::BodyYaw {
            cursor.set_cursor_mode(CursorMode::Locked);
        }

        self.state.grounded = self.motor.is_grounded();
        self.degraded = false;
        log::info!("Simple controller activated ({:?})", self.tuning.facing);
        Ok(())
    }

    fn tick(&mut self, input: &InputFrame, delta_time: f32) -> Actuation {
        self.update(input, delta_time)
            .map_or(Actuation::Inactive, Actuation::Motion)
    }

    fn on_deactivate(&mut self, cursor: &mut dyn CursorService) {
        if self.tuning.facing == Facing::BodyYaw {
            cursor.set_cursor_mode(CursorMode::Free);
        }
        log::info!("Simple controller deactivated");
    }
}
