//! Controller lifecycle trait and lifecycle management

use crate::backend::CursorService;
use crate::error::Result;
use crate::foundation::math::Vec3;
use crate::input::InputFrame;

use super::command::MotionCommand;

/// When a locomotor wants to be ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSchedule {
    /// Once per rendered frame with a variable delta
    PerFrame,
    /// Once per fixed physics step with a constant delta
    FixedStep,
}

/// What one tick did to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Actuation {
    /// A displacement was applied through the motion primitive
    Motion(MotionCommand),
    /// A force was applied to a dynamics body
    Force(Vec3),
    /// Nothing was applied (inactive or degraded)
    Inactive,
}

/// Controller lifecycle trait
///
/// Implemented by every controller variant so an external driver loop can
/// run them without knowing which one it holds.
pub trait Locomotor {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Activate the controller
    ///
    /// Called once before the first tick. Validates tuning and required
    /// references, and may change process-wide cursor state. On error the
    /// controller stays in a degraded state where ticks do nothing.
    fn init(&mut self, cursor: &mut dyn CursorService) -> Result<()>;

    /// Advance one frame or fixed step
    ///
    /// # Arguments
    /// * `input` - Input snapshot for this tick
    /// * `delta_time` - Seconds covered by this tick
    fn tick(&mut self, input: &InputFrame, delta_time: f32) -> Actuation;

    /// Deactivate the controller, undoing anything `init` changed
    fn on_deactivate(&mut self, cursor: &mut dyn CursorService) {
        let _ = cursor;
    }

    /// Called after every fixed step's ticks, once the step is complete
    fn end_fixed_step(&mut self, step: f32) {
        let _ = step;
    }

    /// Which clock drives this controller
    fn schedule(&self) -> TickSchedule {
        TickSchedule::PerFrame
    }
}
