use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stabilizer", inline)]
#[serde(default)]
/// Angle smoothing applied by the stabilization loop.
pub struct StabilizerOptions {
    /// Blend toward each new IK solution instead of snapping to it.
    #[schemars(title = "Smooth")]
    pub smooth: bool,
    /// Inverse time constant of the low-pass filter (1/s).
    #[schemars(title = "Lerp Speed", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub lerp_speed: f64,
}

impl Default for StabilizerOptions {
    fn default() -> Self {
        Self {
            smooth: true,
            lerp_speed: 5.0,
        }
    }
}
