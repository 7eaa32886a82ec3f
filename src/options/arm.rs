use glam::{DQuat, DVec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cartesian axis, used both as a joint's rotation axis and as a target
/// slider's coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All three axes in component order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Right-handed rotation of `radians` about this axis.
    #[must_use]
    pub fn rotation(self, radians: f64) -> DQuat {
        match self {
            Self::X => DQuat::from_rotation_x(radians),
            Self::Y => DQuat::from_rotation_y(radians),
            Self::Z => DQuat::from_rotation_z(radians),
        }
    }

    /// Component index (0, 1, 2).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Upper-case label used in readouts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// This axis' component of `v`.
    #[must_use]
    pub fn component(self, v: DVec3) -> f64 {
        v[self.index()]
    }
}

/// One revolute joint and the link that follows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
pub struct JointOptions {
    /// Rotation axis of the joint.
    pub axis: Axis,
    /// Length of the link driven by this joint (meters).
    pub link_length: f64,
    /// Lower joint limit in degrees.
    pub min_deg: f64,
    /// Upper joint limit in degrees.
    pub max_deg: f64,
}

impl JointOptions {
    /// Limit range converted to radians.
    #[must_use]
    pub fn limit_rad(&self) -> (f64, f64) {
        (self.min_deg.to_radians(), self.max_deg.to_radians())
    }
}

/// Geometry of the simulated arm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Arm", inline)]
#[serde(default)]
pub struct ArmOptions {
    /// World position of the arm's mount before any disturbance.
    #[schemars(skip)]
    pub base: [f64; 3],
    /// Joints from the base outward. Every link points along +Y at rest.
    #[schemars(skip)]
    pub joints: Vec<JointOptions>,
}

impl ArmOptions {
    /// Mount position as a vector.
    #[must_use]
    pub fn base_position(&self) -> DVec3 {
        DVec3::from_array(self.base)
    }

    /// Slider ranges (degrees) for every joint, in chain order.
    #[must_use]
    pub fn joint_ranges_deg(&self) -> Vec<(f64, f64)> {
        self.joints.iter().map(|j| (j.min_deg, j.max_deg)).collect()
    }

    /// Sum of link lengths.
    #[must_use]
    pub fn max_reach(&self) -> f64 {
        self.joints.iter().map(|j| j.link_length).sum()
    }
}

impl Default for ArmOptions {
    fn default() -> Self {
        let joint = |axis, link_length, min_deg, max_deg| JointOptions {
            axis,
            link_length,
            min_deg,
            max_deg,
        };
        Self {
            base: [0.0, 0.0, 0.0],
            joints: vec![
                joint(Axis::Z, 2.0, -180.0, 180.0),
                joint(Axis::Y, 3.0, -90.0, 90.0),
                joint(Axis::X, 2.5, 0.0, 150.0),
                joint(Axis::Y, 1.0, -180.0, 180.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arm_reaches_eight_and_a_half() {
        let arm = ArmOptions::default();
        assert_eq!(arm.joints.len(), 4);
        assert!((arm.max_reach() - 8.5).abs() < 1e-12);
    }

    #[test]
    fn default_ranges_match_sliders() {
        let ranges = ArmOptions::default().joint_ranges_deg();
        assert_eq!(
            ranges,
            vec![(-180.0, 180.0), (-90.0, 90.0), (0.0, 150.0), (-180.0, 180.0)]
        );
    }

    #[test]
    fn axis_rotation_is_right_handed() {
        let v = Axis::Z.rotation(std::f64::consts::FRAC_PI_2) * DVec3::X;
        assert!((v - DVec3::Y).length() < 1e-12);
        assert_eq!(Axis::Y.component(DVec3::new(1.0, 2.0, 3.0)), 2.0);
    }
}
