//! Per-character locomotion state carried from frame to frame.

use crate::foundation::math::{Vec2, Vec3};

/// Vertical velocity held while grounded, so the character keeps pressing
/// into the floor and the motion primitive keeps reporting ground contact.
pub const GROUND_BIAS: f32 = -2.0;

/// Input magnitude below which the desired direction counts as "no input"
pub const MOVE_THRESHOLD: f32 = 0.1;

/// Launch speed that reaches `jump_height` under constant `gravity`.
///
/// `gravity` is negative (pointing down), so this is `sqrt(-2 * g * h)`.
pub fn launch_velocity(gravity: f32, jump_height: f32) -> f32 {
    (-2.0 * gravity * jump_height).max(0.0).sqrt()
}

/// Transient motion state of one character
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    /// Commanded horizontal velocity (x = world X, y = world Z)
    pub horizontal_velocity: Vec2,

    /// Vertical velocity; `GROUND_BIAS` while standing
    pub vertical_velocity: f32,

    /// Ground contact as reported by the host after the last move
    pub grounded: bool,

    /// Unit horizontal move direction, or zero
    pub move_direction: Vec3,

    /// Body yaw in degrees, `[0, 360)`
    pub facing_yaw: f32,

    /// Smoothed horizontal speed
    pub current_speed: f32,

    /// Angular spring state for facing
    pub turn_velocity: f32,

    /// Spring state for speed
    pub speed_velocity: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            horizontal_velocity: Vec2::zeros(),
            vertical_velocity: 0.0,
            grounded: false,
            move_direction: Vec3::zeros(),
            facing_yaw: 0.0,
            current_speed: 0.0,
            turn_velocity: 0.0,
            speed_velocity: 0.0,
        }
    }
}

/// Edges produced by one vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalEvents {
    /// A jump launched this frame
    pub jumped: bool,
    /// Ground contact was regained this frame
    pub landed: bool,
}

impl LocomotionState {
    /// Create a state at rest facing `facing_yaw`
    pub fn facing(facing_yaw: f32) -> Self {
        Self {
            facing_yaw,
            ..Self::default()
        }
    }

    /// Gravity and jump integration for one frame.
    ///
    /// While grounded a downward velocity is reset to [`GROUND_BIAS`], and a
    /// jump press replaces it with the launch velocity. While airborne gravity
    /// accumulates (semi-implicit Euler: the new velocity is what moves the
    /// body this frame).
    pub fn step_vertical(
        &mut self,
        grounded: bool,
        jump_pressed: bool,
        gravity: f32,
        jump_height: f32,
        delta_time: f32,
    ) -> VerticalEvents {
        let mut events = VerticalEvents {
            landed: grounded && !self.grounded,
            ..VerticalEvents::default()
        };
        self.grounded = grounded;

        if grounded {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = GROUND_BIAS;
            }

            if jump_pressed {
                self.vertical_velocity = launch_velocity(gravity, jump_height);
                events.jumped = true;
                log::debug!("Jump launched at {:.3} m/s", self.vertical_velocity);
            }
        } else {
            self.vertical_velocity += gravity * delta_time;
        }

        if events.landed {
            log::debug!("Landed");
        }

        self.sanitize();
        events
    }

    /// Replace any non-finite field with a safe value
    pub fn sanitize(&mut self) {
        fn fix(name: &str, value: &mut f32) {
            if !value.is_finite() {
                log::warn!("Non-finite {} ({}) reset to zero", name, value);
                *value = 0.0;
            }
        }

        fix("vertical_velocity", &mut self.vertical_velocity);
        fix("facing_yaw", &mut self.facing_yaw);
        fix("current_speed", &mut self.current_speed);
        fix("turn_velocity", &mut self.turn_velocity);
        fix("speed_velocity", &mut self.speed_velocity);

        if !self.horizontal_velocity.iter().all(|v| v.is_finite()) {
            log::warn!("Non-finite horizontal velocity reset to zero");
            self.horizontal_velocity = Vec2::zeros();
        }
        if !self.move_direction.iter().all(|v| v.is_finite()) {
            log::warn!("Non-finite move direction reset to zero");
            self.move_direction = Vec3::zeros();
        }
    }
}
