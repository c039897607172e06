//! Per-frame output of a locomotion mapper.

use crate::foundation::math::{utils, Vec3};

/// Animation float carrying the normalized movement speed
pub const SPEED_PERCENT_PARAM: &str = "SpeedPercent";

/// Animation trigger fired on jump launch
pub const JUMP_TRIGGER: &str = "Jump";

/// What a mapper wants done this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    /// Displacement to hand to the motion primitive (`velocity * dt`)
    pub delta: Vec3,

    /// Combined horizontal and vertical velocity behind `delta`
    pub velocity: Vec3,

    /// Animation blend value, always in `[0, 1]`
    pub speed_percent: f32,

    /// A jump launched this frame
    pub jump_triggered: bool,

    /// Ground contact was regained this frame
    pub landed: bool,

    /// Body yaw in degrees, for variants that turn the body
    pub facing_yaw: Option<f32>,
}

impl MotionCommand {
    /// Command that moves nothing
    pub fn idle() -> Self {
        Self {
            delta: Vec3::zeros(),
            velocity: Vec3::zeros(),
            speed_percent: 0.0,
            jump_triggered: false,
            landed: false,
            facing_yaw: None,
        }
    }

    /// Build a command from a velocity and the frame time
    pub fn from_velocity(velocity: Vec3, delta_time: f32) -> Self {
        Self {
            delta: velocity * delta_time.max(0.0),
            velocity,
            ..Self::idle()
        }
    }

    /// Set the animation blend value, clamped into `[0, 1]`
    pub fn with_speed_percent(mut self, speed_percent: f32) -> Self {
        self.speed_percent = utils::clamp01(speed_percent);
        self
    }

    /// Horizontal speed behind this command
    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }
}

impl Default for MotionCommand {
    fn default() -> Self {
        Self::idle()
    }
}

/// Normalized speed for the animation blend: `min(1, speed / reference)`
pub fn speed_percent(horizontal_speed: f32, reference_speed: f32) -> f32 {
    if reference_speed > 0.0 {
        utils::clamp01(horizontal_speed / reference_speed)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_percent_bounds() {
        assert_eq!(speed_percent(0.0, 7.0), 0.0);
        assert_eq!(speed_percent(14.0, 7.0), 1.0);
        assert_eq!(speed_percent(-3.0, 7.0), 0.0);
        assert_eq!(speed_percent(3.0, 0.0), 0.0);
        assert_eq!(speed_percent(f32::NAN, 7.0), 0.0);
    }

    #[test]
    fn test_from_velocity_scales_delta() {
        let command = MotionCommand::from_velocity(Vec3::new(3.0, -2.0, 4.0), 0.5);

        assert_eq!(command.delta, Vec3::new(1.5, -1.0, 2.0));
        assert_eq!(command.horizontal_speed(), 5.0);
        assert!(!command.jump_triggered);
    }
}
