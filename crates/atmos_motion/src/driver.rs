//! Frame driver
//!
//! Stands in for the host engine's scheduler: activates a set of
//! locomotors, ticks per-frame ones once per frame and fixed-step ones once
//! per accumulated physics step, and deactivates them at the end.

use std::collections::HashSet;

use crate::backend::CursorService;
use crate::config::DriverSettings;
use crate::foundation::time::{FixedTimestep, FrameClock};
use crate::input::InputFrame;
use crate::locomotion::{Actuation, Locomotor, TickSchedule};

/// What happened during one driven frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Frame time that was applied
    pub delta_time: f32,

    /// Physics steps run this frame
    pub fixed_steps: u32,

    /// Every tick, in order, labelled with the locomotor name
    pub actuations: Vec<(&'static str, Actuation)>,
}

impl FrameReport {
    /// Actuations issued by the named locomotor
    pub fn for_locomotor<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Actuation> + 'a {
        self.actuations
            .iter()
            .filter(move |(label, _)| *label == name)
            .map(|(_, actuation)| actuation)
    }
}

/// Runs locomotors the way an engine frame loop would
#[derive(Debug)]
pub struct Driver {
    clock: FrameClock,
    fixed: FixedTimestep,
    active: bool,
    warned_inactive: HashSet<&'static str>,
}

impl Driver {
    /// Create a driver with the given timing
    pub fn new(settings: &DriverSettings) -> Self {
        Self {
            clock: FrameClock::new(),
            fixed: FixedTimestep::new(settings.fixed_timestep, settings.max_fixed_steps),
            active: false,
            warned_inactive: HashSet::new(),
        }
    }

    /// Initialize every locomotor; returns how many activated cleanly.
    ///
    /// A failed `init` is logged and the locomotor stays in the set, degraded.
    pub fn activate(
        &mut self,
        locomotors: &mut [&mut dyn Locomotor],
        cursor: &mut dyn CursorService,
    ) -> usize {
        let mut ready = 0;
        for locomotor in locomotors.iter_mut() {
            match locomotor.init(cursor) {
                Ok(()) => ready += 1,
                Err(e) => log::warn!("{} failed to activate: {}", locomotor.name(), e),
            }
        }

        self.active = true;
        self.fixed.reset();
        log::info!("Driver activated {}/{} locomotors", ready, locomotors.len());
        ready
    }

    /// Advance one frame
    ///
    /// Fixed-step locomotors run first, once per physics step that fits into
    /// the accumulated time, then per-frame locomotors run once with the
    /// frame's own delta.
    pub fn frame(
        &mut self,
        delta_time: f32,
        input: &InputFrame,
        locomotors: &mut [&mut dyn Locomotor],
    ) -> FrameReport {
        if !self.active {
            log::warn!("Frame requested before activation, skipping");
            return FrameReport::default();
        }

        self.clock.advance(delta_time);
        let delta_time = self.clock.delta_time();
        let fixed_steps = self.fixed.accumulate(delta_time);
        let step = self.fixed.step();

        let mut report = FrameReport {
            delta_time,
            fixed_steps,
            actuations: Vec::new(),
        };

        for _ in 0..fixed_steps {
            for locomotor in locomotors.iter_mut() {
                if locomotor.schedule() == TickSchedule::FixedStep {
                    let actuation = locomotor.tick(input, step);
                    self.record(&mut report, locomotor.name(), actuation);
                }
            }
            for locomotor in locomotors.iter_mut() {
                if locomotor.schedule() == TickSchedule::FixedStep {
                    locomotor.end_fixed_step(step);
                }
            }
        }

        for locomotor in locomotors.iter_mut() {
            if locomotor.schedule() == TickSchedule::PerFrame {
                let actuation = locomotor.tick(input, delta_time);
                self.record(&mut report, locomotor.name(), actuation);
            }
        }

        report
    }

    /// Deactivate every locomotor
    pub fn deactivate(
        &mut self,
        locomotors: &mut [&mut dyn Locomotor],
        cursor: &mut dyn CursorService,
    ) {
        for locomotor in locomotors.iter_mut() {
            locomotor.on_deactivate(cursor);
        }

        self.active = false;
        log::info!(
            "Driver deactivated after {} frames ({:.2}s, {:.1} fps average)",
            self.clock.frame_count(),
            self.clock.total_time(),
            self.clock.average_fps()
        );
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Fixed-step accumulator
    pub fn fixed_timestep(&self) -> &FixedTimestep {
        &self.fixed
    }

    /// Whether `activate` has run without a matching `deactivate`
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn record(&mut self, report: &mut FrameReport, name: &'static str, actuation: Actuation) {
        if actuation == Actuation::Inactive && self.warned_inactive.insert(name) {
            log::warn!("{} is degraded; its ticks are being skipped", name);
        }
        report.actuations.push((name, actuation));
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(&DriverSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{
        CursorState, DampedAnimator, FixedCamera, FlatGroundMotor, PointMassBody,
    };
    use crate::backend::CursorMode;
    use crate::foundation::math::Vec3;
    use crate::locomotion::{
        ForceMover, ForceMoverTuning, SimpleController, SimpleTuning, ThirdPersonController,
        ThirdPersonTuning,
    };

    fn quarter_step_driver() -> Driver {
        Driver::new(&DriverSettings {
            fixed_timestep: 0.25,
            max_fixed_steps: 4,
        })
    }

    #[test]
    fn test_force_applied_once_per_fixed_step() {
        let mut driver = quarter_step_driver();
        let mut mover = ForceMover::new(ForceMoverTuning::default(), PointMassBody::new(1.0));
        let mut cursor = CursorState::new();
        let input = InputFrame::from_axes(1.0, 0.0);

        driver.activate(&mut [&mut mover], &mut cursor);

        let report = driver.frame(0.5, &input, &mut [&mut mover]);
        assert_eq!(report.fixed_steps, 2);

        // Each step's force was integrated on its own
        assert_eq!(mover.body().forces_this_step(), 0);
        assert_eq!(mover.body().velocity, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(mover.body().position, Vec3::new(1.875, 0.0, 0.0));

        let forces: Vec<_> = report.for_locomotor("force-mover").collect();
        assert_eq!(forces.len(), 2);
        for actuation in forces {
            assert_eq!(*actuation, Actuation::Force(Vec3::new(10.0, 0.0, 0.0)));
        }

        // A short frame runs no physics step
        let report = driver.frame(0.125, &input, &mut [&mut mover]);
        assert_eq!(report.fixed_steps, 0);
        assert!(report.actuations.is_empty());
        assert_eq!(mover.body().velocity, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_per_frame_locomotors_tick_once() {
        let mut driver = quarter_step_driver();
        let mut hero = ThirdPersonController::new(
            ThirdPersonTuning::default(),
            FlatGroundMotor::new(0.0),
            DampedAnimator::new(),
            Some(FixedCamera::new(0.0)),
        );
        let mut cursor = CursorState::new();

        assert_eq!(driver.activate(&mut [&mut hero], &mut cursor), 1);

        let report = driver.frame(1.0, &InputFrame::from_axes(0.0, 1.0), &mut [&mut hero]);
        assert_eq!(report.fixed_steps, 4);
        assert_eq!(report.actuations.len(), 1);
        assert!(matches!(report.actuations[0], ("third-person", Actuation::Motion(_))));
        assert_eq!(driver.clock().frame_count(), 1);
    }

    #[test]
    fn test_failed_activation_keeps_running_others() {
        let mut driver = quarter_step_driver();
        let mut blind: ThirdPersonController<_, _, FixedCamera> = ThirdPersonController::new(
            ThirdPersonTuning::default(),
            FlatGroundMotor::new(0.0),
            (),
            None,
        );
        let mut stickman = SimpleController::new(
            SimpleTuning::default(),
            FlatGroundMotor::new(0.0),
            DampedAnimator::new(),
        );
        let mut cursor = CursorState::new();

        let ready = driver.activate(&mut [&mut blind, &mut stickman], &mut cursor);
        assert_eq!(ready, 1);

        let input = InputFrame::from_axes(0.0, 1.0);
        for _ in 0..3 {
            let report = driver.frame(0.25, &input, &mut [&mut blind, &mut stickman]);
            assert_eq!(report.actuations[0], ("third-person", Actuation::Inactive));
            assert!(matches!(report.actuations[1], ("simple", Actuation::Motion(_))));
        }

        assert_eq!(blind.motor().position(), Vec3::zeros());
        assert!(stickman.motor().position().z > 0.0);
    }

    #[test]
    fn test_deactivate_restores_cursor() {
        let mut driver = Driver::default();
        let mut stickman = SimpleController::new(
            SimpleTuning::default(),
            FlatGroundMotor::new(0.0),
            DampedAnimator::new(),
        );
        let mut cursor = CursorState::new();

        driver.activate(&mut [&mut stickman], &mut cursor);
        assert_eq!(cursor.mode(), CursorMode::Locked);
        assert!(driver.is_active());

        driver.deactivate(&mut [&mut stickman], &mut cursor);
        assert_eq!(cursor.mode(), CursorMode::Free);
        assert!(!driver.is_active());
    }

    #[test]
    fn test_frame_before_activation_is_skipped() {
        let mut driver = Driver::default();
        let mut mover = ForceMover::new(ForceMoverTuning::default(), PointMassBody::new(1.0));

        let report = driver.frame(1.0, &InputFrame::from_axes(1.0, 0.0), &mut [&mut mover]);

        assert_eq!(report.fixed_steps, 0);
        assert_eq!(mover.body().forces_this_step(), 0);
        assert_eq!(driver.clock().frame_count(), 0);
    }
}
