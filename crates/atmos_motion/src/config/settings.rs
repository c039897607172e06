//! Top-level tuning surface

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::{require_positive, LocomotionError, Result};
use crate::input::InputSettings;
use crate::locomotion::tuning::{ForceMoverTuning, SimpleTuning, ThirdPersonTuning};

/// Every tunable value, as loaded from a settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Camera-relative controller
    pub third_person: ThirdPersonTuning,

    /// Simple controller
    pub simple: SimpleTuning,

    /// Force-driven rolling body
    pub force_mover: ForceMoverTuning,

    /// Key bindings and axis smoothing
    pub input: InputSettings,

    /// Frame driver timing
    pub driver: DriverSettings,
}

impl Config for Settings {}

impl Settings {
    /// Validate every tuning block
    pub fn validate(&self) -> Result<()> {
        self.third_person.validate()?;
        self.simple.validate()?;
        self.force_mover.validate()?;
        self.driver.validate()?;
        require_positive("input.axis.sensitivity", self.input.axis.sensitivity)?;
        require_positive("input.axis.gravity", self.input.axis.gravity)?;
        Ok(())
    }

    /// Load and validate settings, falling back to defaults when `path` is missing
    pub fn load(path: &str) -> Result<Self> {
        let settings = Self::load_or_default(path)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Timing of the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Length of one physics step in seconds
    pub fixed_timestep: f32,

    /// Most physics steps run in a single frame
    pub max_fixed_steps: u32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            fixed_timestep: 0.02,
            max_fixed_steps: 8,
        }
    }
}

impl DriverSettings {
    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        require_positive("driver.fixed_timestep", self.fixed_timestep)?;
        if self.max_fixed_steps == 0 {
            return Err(LocomotionError::InvalidTuning {
                field: "driver.max_fixed_steps",
                value: 0.0,
                reason: "must be at least one",
            });
        }
        Ok(())
    }
}
