//! Math utilities and types
//!
//! Provides the vector types used by the locomotion mappers along with the
//! scalar smoothing helpers they are built on. The coordinate convention is
//! Y-up with +Z as "forward" at yaw zero and +X as "right".

pub use nalgebra::{
    Vector2, Vector3,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Lower bound applied to smoothing time constants
    pub const MIN_SMOOTH_TIME: f32 = 1e-4;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value into `[0, 1]`; NaN maps to 0
    pub fn clamp01(value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap `t` into `[0, length)`
    pub fn repeat(t: f32, length: f32) -> f32 {
        (t - (t / length).floor() * length).clamp(0.0, length)
    }

    /// Shortest signed difference from `current` to `target`, in degrees
    pub fn delta_angle(current: f32, target: f32) -> f32 {
        let delta = repeat(target - current, 360.0);
        if delta > 180.0 {
            delta - 360.0
        } else {
            delta
        }
    }

    /// Critically damped approach of `current` toward `target`.
    ///
    /// `velocity` carries the spring state between calls and must be owned by
    /// the caller. The result never passes `target`: if a step would overshoot
    /// it lands exactly on the target and the velocity is zeroed. Pass
    /// `f32::INFINITY` as `max_speed` for no rate limit.
    ///
    /// A non-positive or non-finite `delta_time` leaves both the value and the
    /// velocity untouched.
    pub fn smooth_damp(
        current: f32,
        target: f32,
        velocity: &mut f32,
        smooth_time: f32,
        max_speed: f32,
        delta_time: f32,
    ) -> f32 {
        if !(delta_time > 0.0 && delta_time.is_finite()) {
            return current;
        }

        let smooth_time = smooth_time.max(constants::MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;

        // Rational approximation of exp(-omega * dt)
        let x = omega * delta_time;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let max_change = max_speed.max(0.0) * smooth_time;
        let change = (current - target).clamp(-max_change, max_change);
        let goal = current - change;

        let temp = (*velocity + omega * change) * delta_time;
        *velocity = (*velocity - omega * temp) * decay;
        let mut output = goal + (change + temp) * decay;

        if (target - current > 0.0) == (output > target) {
            output = target;
            *velocity = 0.0;
        }

        output
    }

    /// [`smooth_damp`] for angles in degrees, travelling the shortest arc.
    ///
    /// The result is not wrapped; use [`repeat`] to bring it into `[0, 360)`.
    pub fn smooth_damp_angle(
        current: f32,
        target: f32,
        velocity: &mut f32,
        smooth_time: f32,
        max_speed: f32,
        delta_time: f32,
    ) -> f32 {
        let target = current + delta_angle(current, target);
        smooth_damp(current, target, velocity, smooth_time, max_speed, delta_time)
    }

    /// Rotation about +Y by `yaw_degrees`
    pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(yaw_degrees))
    }

    /// Forward (+Z) axis of a body with the given yaw
    pub fn yaw_forward(yaw_degrees: f32) -> Vec3 {
        yaw_rotation(yaw_degrees) * Vec3::z()
    }

    /// Right (+X) axis of a body with the given yaw
    pub fn yaw_right(yaw_degrees: f32) -> Vec3 {
        yaw_rotation(yaw_degrees) * Vec3::x()
    }

    /// Scale `v` down so its length does not exceed `max_length`
    pub fn clamp_magnitude(v: Vec2, max_length: f32) -> Vec2 {
        let length = v.magnitude();
        if length > max_length && length > 0.0 {
            v * (max_length / length)
        } else {
            v
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_repeat_wraps_negative_angles() {
        assert_relative_eq!(repeat(-90.0, 360.0), 270.0, epsilon = EPSILON);
        assert_relative_eq!(repeat(725.0, 360.0), 5.0, epsilon = 1e-3);
        assert_relative_eq!(repeat(0.0, 360.0), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_delta_angle_takes_short_way() {
        assert_relative_eq!(delta_angle(350.0, 10.0), 20.0, epsilon = 1e-3);
        assert_relative_eq!(delta_angle(10.0, 350.0), -20.0, epsilon = 1e-3);
        assert_relative_eq!(delta_angle(0.0, 180.0), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_smooth_damp_never_overshoots() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        let mut previous = value;

        for _ in 0..240 {
            value = smooth_damp(value, 7.0, &mut velocity, 0.1, f32::INFINITY, 1.0 / 60.0);
            assert!(value >= previous - 1e-6, "moved away from target: {value} < {previous}");
            assert!(value <= 7.0, "overshot target: {value}");
            previous = value;
        }

        assert_abs_diff_eq!(value, 7.0, epsilon = 1e-3);
    }

    #[test]
    fn test_smooth_damp_respects_max_speed() {
        let mut velocity = 0.0;
        let value = smooth_damp(0.0, 100.0, &mut velocity, 0.5, 2.0, 0.1);

        // Change is limited to max_speed * smooth_time = 1.0 per call
        assert!(value <= 1.0);
    }

    #[test]
    fn test_smooth_damp_zero_delta_time_is_noop() {
        let mut velocity = 3.0;
        let value = smooth_damp(1.0, 5.0, &mut velocity, 0.1, f32::INFINITY, 0.0);

        assert_eq!(value, 1.0);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn test_smooth_damp_angle_crosses_wraparound() {
        let mut velocity = 0.0;
        let mut angle = 350.0;

        for _ in 0..120 {
            angle = smooth_damp_angle(angle, 10.0, &mut velocity, 0.1, f32::INFINITY, 1.0 / 60.0);
        }

        // Went up through 360 rather than down through 180
        assert_abs_diff_eq!(repeat(angle, 360.0), 10.0, epsilon = 1e-2);
        assert!(angle > 350.0);
    }

    #[test]
    fn test_yaw_axes() {
        assert_relative_eq!(yaw_forward(0.0), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(yaw_forward(90.0), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(yaw_right(0.0), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(yaw_right(90.0), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_clamp_magnitude() {
        let diagonal = clamp_magnitude(Vec2::new(1.0, 1.0), 1.0);
        assert_relative_eq!(diagonal.magnitude(), 1.0, epsilon = EPSILON);

        let short = clamp_magnitude(Vec2::new(0.3, 0.0), 1.0);
        assert_eq!(short, Vec2::new(0.3, 0.0));
    }
}
