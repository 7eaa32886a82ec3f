//! Closed-form two-link planar arm.
//!
//! Both joints rotate about +Z and the arm lies in the XY plane, links along
//! +X at rest. IK is analytic and deterministic, which makes this the solver
//! of choice for exercising the control loop.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use super::solver::{KinematicsSolver, SolveOutcome};
use crate::error::ArmError;

/// Out-of-plane distance still treated as in the plane.
const PLANE_EPS: f64 = 1e-9;

/// Two revolute joints about +Z with analytic inverse kinematics.
#[derive(Debug, Clone)]
pub struct PlanarTwoLinkSolver {
    lengths: [f64; 2],
    angles: [f64; 2],
}

impl PlanarTwoLinkSolver {
    /// Arm with upper link `l1` and lower link `l2`, both straight along +X.
    pub fn new(l1: f64, l2: f64) -> Result<Self, ArmError> {
        if !(l1.is_finite() && l2.is_finite() && l1 > 0.0 && l2 > 0.0) {
            return Err(ArmError::Creation(format!(
                "planar link lengths must be positive, got {l1} and {l2}"
            )));
        }
        Ok(Self {
            lengths: [l1, l2],
            angles: [0.0, 0.0],
        })
    }

    /// Both elbow branches for `target`, or `None` out of reach.
    fn branches(&self, target: DVec3) -> Option<[[f64; 2]; 2]> {
        let [l1, l2] = self.lengths;
        if target.z.abs() > PLANE_EPS {
            return None;
        }
        let d2 = target.x * target.x + target.y * target.y;
        let d = d2.sqrt();
        if d > l1 + l2 + PLANE_EPS || d < (l1 - l2).abs() - PLANE_EPS {
            return None;
        }

        let cos_elbow = ((d2 - l1 * l1 - l2 * l2) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
        let elbow = cos_elbow.acos();
        let heading = target.y.atan2(target.x);
        let solve = |e: f64| {
            let shoulder = heading - (l2 * e.sin()).atan2(l1 + l2 * e.cos());
            [wrap(shoulder), e]
        };
        Some([solve(elbow), solve(-elbow)])
    }
}

/// Wrap an angle into (-π, π].
fn wrap(a: f64) -> f64 {
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w <= -PI {
        w + TAU
    } else {
        w
    }
}

impl KinematicsSolver for PlanarTwoLinkSolver {
    fn joint_count(&self) -> usize {
        2
    }

    fn set_angles(&mut self, angles: &[f64]) {
        for (slot, &a) in self.angles.iter_mut().zip(angles) {
            *slot = a;
        }
    }

    fn angles(&self) -> &[f64] {
        &self.angles
    }

    fn joint_positions(&self) -> Vec<DVec3> {
        let [l1, l2] = self.lengths;
        let [a1, a2] = self.angles;
        let elbow = DVec3::new(l1 * a1.cos(), l1 * a1.sin(), 0.0);
        let hand =
            elbow + DVec3::new(l2 * (a1 + a2).cos(), l2 * (a1 + a2).sin(), 0.0);
        vec![DVec3::ZERO, elbow, hand]
    }

    /// Picks the elbow branch closest to the stored pose.
    fn solve_ik(&self, target: DVec3) -> SolveOutcome {
        let Some(candidates) = self.branches(target) else {
            return SolveOutcome::Unreachable;
        };
        let cost = |c: &[f64; 2]| {
            c.iter()
                .zip(&self.angles)
                .map(|(a, b)| wrap(a - b).powi(2))
                .sum::<f64>()
        };
        let [up, down] = candidates;
        let best = if cost(&down) < cost(&up) { down } else { up };
        SolveOutcome::Reached(best.to_vec())
    }

    fn max_reach(&self) -> f64 {
        self.lengths[0] + self.lengths[1]
    }
}
