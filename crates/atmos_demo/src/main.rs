//! Headless locomotion demo
//!
//! Runs a scripted input timeline through a third-person character, a
//! body-yaw stickman and a force-driven ball, all on headless hosts, and logs
//! where each of them ended up after every phase.
//!
//! Usage: `atmos_demo [settings.toml|settings.ron] [demo.toml|demo.ron]`

mod config;
mod scenario;

use atmos_motion::backend::headless::{
    CursorState, DampedAnimator, FixedCamera, FlatGroundMotor, PointMassBody,
};
use atmos_motion::config::{Config, Settings};
use atmos_motion::foundation::logging;
use atmos_motion::foundation::math::Vec3;
use atmos_motion::input::InputManager;
use atmos_motion::locomotion::{
    Actuation, ForceMover, SimpleController, ThirdPersonController, SPEED_PERCENT_PARAM,
};
use atmos_motion::Driver;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::DemoConfig;
use crate::scenario::Timeline;

type Hero = ThirdPersonController<FlatGroundMotor, DampedAnimator, FixedCamera>;
type Stickman = SimpleController<FlatGroundMotor, DampedAnimator>;
type Ball = ForceMover<PointMassBody>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting atmos locomotion demo");

    let args: Vec<String> = std::env::args().collect();
    let settings = match args.get(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };
    let demo = match args.get(2) {
        Some(path) => DemoConfig::load_or_default(path)?,
        None => DemoConfig::default(),
    }
    .sanitized();

    let mut hero: Hero = ThirdPersonController::new(
        settings.third_person.clone(),
        FlatGroundMotor::new(0.0),
        DampedAnimator::new(),
        Some(FixedCamera::new(demo.camera_yaw)),
    );
    let mut stickman: Stickman = SimpleController::new(
        settings.simple.clone(),
        FlatGroundMotor::at(Vec3::new(4.0, 0.0, 0.0), 0.0),
        DampedAnimator::new(),
    );
    let mut ball: Ball = ForceMover::new(
        settings.force_mover.clone(),
        PointMassBody::new(demo.ball_mass).with_damping(demo.ball_damping),
    );

    let mut driver = Driver::new(&settings.driver);
    let mut cursor = CursorState::new();
    let mut input = InputManager::with_settings(settings.input.clone());
    let mut timeline = Timeline::new(scenario::standard(), demo.mouse_speed);
    let mut rng = StdRng::seed_from_u64(demo.seed);

    let ready = driver.activate(&mut [&mut hero, &mut stickman, &mut ball], &mut cursor);
    log::info!(
        "{} controllers ready, cursor {:?}, script {:.2}s",
        ready,
        cursor.mode(),
        timeline.duration()
    );

    let mut jumps = 0;
    let mut landings = 0;

    for _ in 0..demo.frames {
        if timeline.finished() {
            break;
        }

        let delta_time = demo.frame_time * (1.0 + rng.gen_range(-demo.jitter..=demo.jitter));

        if let Some(phase) = timeline.advance(&mut input, delta_time) {
            summarize(phase.name, &hero, &stickman, &ball);
        }

        input.begin_frame(delta_time);
        let frame = input.sample();
        let report = driver.frame(delta_time, &frame, &mut [&mut hero, &mut stickman, &mut ball]);
        input.end_frame();

        for actuation in &report.actuations {
            if let (name, Actuation::Motion(command)) = actuation {
                if command.jump_triggered {
                    jumps += 1;
                    log::info!("{} jumped at {:.2}s", name, driver.clock().total_time());
                }
                if command.landed {
                    landings += 1;
                }
            }
        }
    }

    let last = timeline.current().map_or("end", |phase| phase.name);
    summarize(last, &hero, &stickman, &ball);

    driver.deactivate(&mut [&mut hero, &mut stickman, &mut ball], &mut cursor);

    log::info!(
        "Demo finished: {} jumps, {} landings, {:.3}s of physics dropped, cursor {:?}",
        jumps,
        landings,
        driver.fixed_timestep().dropped_time(),
        cursor.mode()
    );

    Ok(())
}

fn summarize(phase: &str, hero: &Hero, stickman: &Stickman, ball: &Ball) {
    let blend = |animator: &DampedAnimator| animator.float(SPEED_PERCENT_PARAM).unwrap_or(0.0);

    let position = hero.motor().position();
    log::info!(
        "[{}] hero: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} speed%={:.2} vy={:.2}",
        phase,
        position.x,
        position.y,
        position.z,
        hero.state().facing_yaw,
        blend(hero.animator()),
        hero.state().vertical_velocity
    );

    let position = stickman.motor().position();
    log::info!(
        "[{}] stickman: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} speed%={:.2} vy={:.2}",
        phase,
        position.x,
        position.y,
        position.z,
        stickman.state().facing_yaw,
        blend(stickman.animator()),
        stickman.state().vertical_velocity
    );

    let body = ball.body();
    log::info!(
        "[{}] ball: pos=({:.2}, {:.2}) vel=({:.2}, {:.2})",
        phase,
        body.position.x,
        body.position.z,
        body.velocity.x,
        body.velocity.z
    );
}
