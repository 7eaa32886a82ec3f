use std::time::Duration;

use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Manual control surface: slider ranges, apply intervals, reset pose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Panel", inline)]
#[serde(default)]
pub struct PanelOptions {
    /// Minimum spacing between applied joint-angle changes (ms).
    #[schemars(title = "Angle Interval", range(min = 0, max = 1000), extend("step" = 10))]
    pub angle_interval_ms: u64,
    /// Minimum spacing between applied target solves (ms).
    #[schemars(title = "Target Interval", range(min = 0, max = 1000), extend("step" = 10))]
    pub target_interval_ms: u64,
    /// `[min, max]` of the X target slider.
    #[schemars(skip)]
    pub target_x: [f64; 2],
    /// `[min, max]` of the Y target slider.
    #[schemars(skip)]
    pub target_y: [f64; 2],
    /// `[min, max]` of the Z target slider.
    #[schemars(skip)]
    pub target_z: [f64; 2],
    /// Target readout restored by a reset.
    #[schemars(skip)]
    pub reset_target: [f64; 3],
}

impl PanelOptions {
    /// Target slider ranges in X, Y, Z order.
    #[must_use]
    pub fn target_ranges(&self) -> [(f64, f64); 3] {
        [self.target_x, self.target_y, self.target_z].map(|[lo, hi]| (lo, hi))
    }

    /// Canonical reset target as a vector.
    #[must_use]
    pub fn reset_target(&self) -> DVec3 {
        DVec3::from_array(self.reset_target)
    }

    /// Angle apply interval in seconds.
    #[must_use]
    pub fn angle_interval_secs(&self) -> f64 {
        Duration::from_millis(self.angle_interval_ms).as_secs_f64()
    }

    /// Target apply interval in seconds.
    #[must_use]
    pub fn target_interval_secs(&self) -> f64 {
        Duration::from_millis(self.target_interval_ms).as_secs_f64()
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            angle_interval_ms: 100,
            target_interval_ms: 100,
            target_x: [-5.0, 5.0],
            target_y: [0.0, 8.0],
            target_z: [-5.0, 5.0],
            reset_target: [0.0, 2.0, 0.0],
        }
    }
}
