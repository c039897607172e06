//! Force-driven rolling body.

use crate::backend::{CursorService, ForceBody};
use crate::error::Result;
use crate::foundation::math::Vec3;
use crate::input::InputFrame;

use super::lifecycle::{Actuation, Locomotor, TickSchedule};
use super::tuning::ForceMoverTuning;

/// Pushes a dynamics body along the input axes once per physics step.
///
/// The body's own integrator handles inertia, gravity and contacts, so this
/// does no smoothing and keeps no motion state of its own.
pub struct ForceMover<B> {
    tuning: ForceMoverTuning,
    body: B,
    degraded: bool,
}

impl<B: ForceBody> ForceMover<B> {
    /// Create a mover driving `body`
    pub fn new(tuning: ForceMoverTuning, body: B) -> Self {
        Self {
            tuning,
            body,
            degraded: false,
        }
    }

    /// Planar force for the given input: `(x, 0, y) * move_speed`
    pub fn force_for(&self, input: &InputFrame) -> Vec3 {
        let axes = input.smoothed_axes;
        Vec3::new(axes.x, 0.0, axes.y) * self.tuning.move_speed
    }

    /// Apply one physics step worth of force and return it
    pub fn fixed_update(&mut self, input: &InputFrame) -> Vec3 {
        let force = self.force_for(input);
        self.body.add_force(force);
        log::trace!("force mover: force={:?}", force);
        force
    }

    /// The driven body
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutable body, for hosts that integrate it between steps
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Active tuning
    pub fn tuning(&self) -> &ForceMoverTuning {
        &self.tuning
    }
}

impl<B: ForceBody> Locomotor for ForceMover<B> {
    fn name(&self) -> &'static str {
        "force-mover"
    }

    fn init(&mut self, _cursor: &mut dyn CursorService) -> Result<()> {
        if let Err(err) = self.tuning.validate() {
            self.degraded = true;
            return Err(err);
        }

        self.degraded = false;
        log::info!("Force mover activated");
        Ok(())
    }

    fn tick(&mut self, input: &InputFrame, _delta_time: f32) -> Actuation {
        if self.degraded {
            return Actuation::Inactive;
        }
        Actuation::Force(self.fixed_update(input))
    }

    fn end_fixed_step(&mut self, step: f32) {
        self.body.end_step(step);
    }

    fn schedule(&self) -> TickSchedule {
        TickSchedule::FixedStep
    }
}
