use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-axis sinusoidal shake applied to the arm's mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Disturbance", inline)]
#[serde(default)]
pub struct DisturbanceOptions {
    /// Peak offset per axis (meters).
    #[schemars(title = "Amplitude")]
    pub amplitude: [f64; 3],
    /// Oscillation frequency per axis (Hz).
    #[schemars(title = "Frequency")]
    pub frequency: [f64; 3],
}

impl DisturbanceOptions {
    /// Amplitude as a vector.
    #[must_use]
    pub fn amplitude(&self) -> DVec3 {
        DVec3::from_array(self.amplitude)
    }

    /// Frequency as a vector.
    #[must_use]
    pub fn frequency(&self) -> DVec3 {
        DVec3::from_array(self.frequency)
    }
}

impl Default for DisturbanceOptions {
    fn default() -> Self {
        Self {
            amplitude: [0.3, 0.0, 0.3],
            frequency: [0.5, 0.7, 0.4],
        }
    }
}
