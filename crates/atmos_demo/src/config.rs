//! Demo run configuration

use atmos_motion::config::Config;
use serde::{Deserialize, Serialize};

/// How the scripted run is paced and staged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Hard cap on frames, even if the script runs longer
    pub frames: u32,

    /// Nominal frame time in seconds
    pub frame_time: f32,

    /// Relative frame-time jitter; 0.25 means each frame lasts 75% to 125% of nominal
    pub jitter: f32,

    /// Seed for the jitter generator, so runs are reproducible
    pub seed: u64,

    /// Yaw of the third-person camera in degrees
    pub camera_yaw: f32,

    /// Mouse travel per second while the script is turning
    pub mouse_speed: f64,

    /// Mass of the rolling ball
    pub ball_mass: f32,

    /// Linear damping of the rolling ball
    pub ball_damping: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 1200,
            frame_time: 1.0 / 60.0,
            jitter: 0.25,
            seed: 0x5EED,
            camera_yaw: 0.0,
            mouse_speed: 200.0,
            ball_mass: 1.0,
            ball_damping: 0.5,
        }
    }
}

impl Config for DemoConfig {}

impl DemoConfig {
    /// Frame time with out-of-range values pulled back to something usable
    pub fn sanitized(mut self) -> Self {
        if !(self.frame_time.is_finite() && self.frame_time > 0.0) {
            log::warn!("Invalid frame_time {}, using 1/60 s", self.frame_time);
            self.frame_time = 1.0 / 60.0;
        }
        self.jitter = if self.jitter.is_finite() { self.jitter.clamp(0.0, 0.9) } else { 0.0 };
        self.ball_mass = self.ball_mass.max(0.01);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let config = DemoConfig {
            frame_time: -1.0,
            jitter: 3.0,
            ..Default::default()
        }
        .sanitized();

        assert!(config.frame_time > 0.0);
        assert!(config.jitter <= 0.9);
    }
}
