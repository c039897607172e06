//! Scenario tests that run whole controllers against the headless host.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;
use crate::backend::headless::{CursorState, DampedAnimator, FixedCamera, FlatGroundMotor};
use crate::backend::MotionPrimitive;
use crate::foundation::math::Vec3;
use crate::input::InputFrame;

const DT: f32 = 1.0 / 60.0;

type Hero = ThirdPersonController<FlatGroundMotor, DampedAnimator, FixedCamera>;

fn hero() -> Hero {
    let mut controller = ThirdPersonController::new(
        ThirdPersonTuning::default(),
        FlatGroundMotor::new(0.0),
        DampedAnimator::new(),
        Some(FixedCamera::new(0.0)),
    );
    controller.init(&mut CursorState::new()).unwrap();
    controller
}

fn motion(actuation: Actuation) -> MotionCommand {
    match actuation {
        Actuation::Motion(command) => command,
        other => panic!("expected motion, got {:?}", other),
    }
}

#[test]
fn test_airborne_vertical_velocity_sample() {
    let mut controller = hero();
    controller.tick(&InputFrame::idle(), DT);
    controller.tick(&InputFrame::idle().with_jump(true), DT);

    let v0 = launch_velocity(-25.0, 1.5);
    assert_relative_eq!(v0, 8.66, epsilon = 1e-2);
    assert_relative_eq!(controller.state().vertical_velocity, v0);

    for frame in 1..=20 {
        controller.tick(&InputFrame::idle(), DT);
        let t = frame as f32 * DT;
        assert!(!controller.state().grounded);
        assert_relative_eq!(
            controller.state().vertical_velocity,
            v0 - 25.0 * t,
            epsilon = 1e-3
        );
    }
}

#[test]
fn test_direction_resets_on_landing_frame() {
    let mut controller = hero();
    let forward = InputFrame::from_axes(0.0, 1.0);
    for _ in 0..30 {
        controller.tick(&forward, DT);
    }

    controller.tick(&forward.with_jump(true), DT);

    let mut landed_frame = None;
    for frame in 0..120 {
        let command = motion(controller.tick(&InputFrame::idle(), DT));
        let state = controller.state();

        if state.grounded {
            assert_eq!(state.move_direction, Vec3::zeros());
            assert!(command.landed);
            landed_frame = Some(frame);
            break;
        }
        assert_relative_eq!(state.move_direction, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-3);
    }

    assert!(landed_frame.is_some(), "never landed");
    assert_eq!(controller.state().vertical_velocity, GROUND_BIAS);
}

#[test]
fn test_spawning_on_the_floor_is_not_a_landing() {
    let mut controller = hero();
    assert!(controller.state().grounded);

    for _ in 0..2 {
        let command = motion(controller.tick(&InputFrame::idle(), DT));
        assert!(!command.landed);
    }

    let mut stickman = SimpleController::new(
        SimpleTuning::default(),
        FlatGroundMotor::new(0.0),
        DampedAnimator::new(),
    );
    stickman.init(&mut CursorState::new()).unwrap();
    let command = motion(stickman.tick(&InputFrame::from_axes(0.0, 1.0), DT));
    assert!(!command.landed);
}

#[test]
fn test_jump_apex_on_flat_ground() {
    let mut controller = hero();
    controller.tick(&InputFrame::idle(), DT);
    controller.tick(&InputFrame::idle().with_jump(true), DT);

    let mut apex = controller.motor().position().y;
    while !controller.motor().is_grounded() {
        controller.tick(&InputFrame::idle(), DT);
        apex = apex.max(controller.motor().position().y);
    }

    let tolerance = launch_velocity(-25.0, 1.5) * DT;
    assert_abs_diff_eq!(apex, 1.5, epsilon = tolerance);
}

#[test]
fn test_grounded_bias_holds_for_any_downward_velocity() {
    for i in 0..50 {
        let mut state = LocomotionState {
            grounded: true,
            vertical_velocity: -0.01 - i as f32 * 3.7,
            ..Default::default()
        };

        third_person::step(
            &mut state,
            &ThirdPersonTuning::default(),
            &InputFrame::from_axes(0.3, -0.8),
            true,
            0.0,
            DT,
        );
        assert_eq!(state.vertical_velocity, GROUND_BIAS);

        let mut state = LocomotionState {
            grounded: true,
            vertical_velocity: -0.01 - i as f32 * 3.7,
            ..Default::default()
        };
        simple::step(
            &mut state,
            &SimpleTuning::default(),
            &InputFrame::from_axes(0.3, -0.8),
            true,
            DT,
        );
        assert_eq!(state.vertical_velocity, GROUND_BIAS);
    }
}

#[test]
fn test_speed_settles_without_overshoot_under_variable_frames() {
    let tuning = ThirdPersonTuning::default();
    let mut state = LocomotionState {
        grounded: true,
        ..Default::default()
    };
    let input = InputFrame::from_axes(0.0, 1.0).with_sprint(true);

    for i in 0..200 {
        let dt = if i % 2 == 0 { 1.0 / 30.0 } else { 1.0 / 144.0 };
        third_person::step(&mut state, &tuning, &input, true, 0.0, dt);
        assert!(state.current_speed <= tuning.run_speed + 1e-4);
    }

    assert_abs_diff_eq!(state.current_speed, tuning.run_speed, epsilon = 1e-3);
}

#[test]
fn test_blend_stays_in_unit_range_for_both_variants() {
    let configs = [(1.0, 1.0), (3.0, 7.0), (20.0, 20.0)];
    for (walk, run) in configs {
        let third = ThirdPersonTuning {
            walk_speed: walk,
            run_speed: run,
            ..Default::default()
        };
        let simple_tuning = SimpleTuning {
            walk_speed: walk,
            sprint_speed: run,
            ..Default::default()
        };
        let mut a = LocomotionState::default();
        let mut b = LocomotionState::default();

        for i in 0..100 {
            let x = (i as f32 * 0.7).sin();
            let y = (i as f32 * 0.3).cos();
            let input = InputFrame::from_axes(x, y)
                .with_sprint(i % 2 == 0)
                .with_look(x * 5.0);

            let c1 = third_person::step(&mut a, &third, &input, true, 0.0, DT);
            let c2 = simple::step(&mut b, &simple_tuning, &input, true, DT);
            assert!((0.0..=1.0).contains(&c1.speed_percent));
            assert!((0.0..=1.0).contains(&c2.speed_percent));
        }
    }
}

#[test]
fn test_zero_dt_changes_nothing() {
    let mut controller = hero();
    for _ in 0..10 {
        controller.tick(&InputFrame::from_axes(0.0, 1.0), DT);
    }
    let before = controller.state().clone();
    let position = controller.motor().position();

    controller.tick(&InputFrame::from_axes(1.0, 0.0), 0.0);

    assert_eq!(controller.motor().position(), position);
    assert_eq!(controller.state().current_speed, before.current_speed);
    assert_eq!(controller.state().facing_yaw, before.facing_yaw);
    assert!(controller.state().vertical_velocity.is_finite());
}
