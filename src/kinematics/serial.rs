//! Numeric reference solver for an N-joint serial arm.
//!
//! Every link points along +Y at rest. Link `i` is oriented by the composed
//! rotation of joints `0..=i`, base joint outermost. Inverse kinematics is a
//! warm-started gradient descent on squared effector distance with a
//! finite-difference gradient.

use glam::{DQuat, DVec3};

use super::solver::{KinematicsSolver, SolveOutcome};
use crate::error::ArmError;
use crate::options::{ArmOptions, Axis, SolverOptions};

#[derive(Debug, Clone)]
struct Joint {
    axis: Axis,
    min: f64,
    max: f64,
    link_length: f64,
}

impl Joint {
    fn clamp(&self, angle: f64) -> f64 {
        angle.clamp(self.min, self.max)
    }
}

/// Gradient-descent IK over a chain of revolute joints with limits.
#[derive(Debug, Clone)]
pub struct SerialArmSolver {
    joints: Vec<Joint>,
    angles: Vec<f64>,
    tuning: SolverOptions,
}

impl SerialArmSolver {
    /// Build a solver for `arm`, starting at the zero pose (clamped into
    /// the limits).
    pub fn create(
        arm: &ArmOptions,
        tuning: &SolverOptions,
    ) -> Result<Self, ArmError> {
        if arm.joints.is_empty() {
            return Err(ArmError::Creation("arm has no joints".into()));
        }
        let mut joints = Vec::with_capacity(arm.joints.len());
        for (i, j) in arm.joints.iter().enumerate() {
            if !(j.link_length.is_finite() && j.link_length > 0.0) {
                return Err(ArmError::Creation(format!(
                    "joint {i}: link length {} must be positive",
                    j.link_length
                )));
            }
            let (min, max) = j.limit_rad();
            if !(min <= max) {
                return Err(ArmError::Creation(format!(
                    "joint {i}: limit [{}, {}] is inverted",
                    j.min_deg, j.max_deg
                )));
            }
            joints.push(Joint {
                axis: j.axis,
                min,
                max,
                link_length: j.link_length,
            });
        }
        if !(tuning.max_iterations > 0 && tuning.gradient_step > 0.0) {
            return Err(ArmError::Creation(
                "solver needs a positive iteration budget and gradient step"
                    .into(),
            ));
        }

        let angles = joints.iter().map(|j| j.clamp(0.0)).collect();
        Ok(Self {
            joints,
            angles,
            tuning: tuning.clone(),
        })
    }

    fn clamped(&self, angles: &[f64]) -> Vec<f64> {
        self.joints
            .iter()
            .zip(angles)
            .map(|(j, &a)| j.clamp(a))
            .collect()
    }

    fn forward(&self, angles: &[f64]) -> Vec<DVec3> {
        let mut out = Vec::with_capacity(self.joints.len() + 1);
        let mut pos = DVec3::ZERO;
        let mut rot = DQuat::IDENTITY;
        out.push(pos);
        for (joint, &angle) in self.joints.iter().zip(angles) {
            rot *= joint.axis.rotation(angle);
            pos += rot * DVec3::Y * joint.link_length;
            out.push(pos);
        }
        out
    }

    fn effector(&self, angles: &[f64]) -> DVec3 {
        self.forward(&self.clamped(angles))
            .last()
            .copied()
            .unwrap_or(DVec3::ZERO)
    }
}

impl KinematicsSolver for SerialArmSolver {
    fn joint_count(&self) -> usize {
        self.joints.len()
    }

    fn set_angles(&mut self, angles: &[f64]) {
        for ((slot, joint), &a) in
            self.angles.iter_mut().zip(&self.joints).zip(angles)
        {
            *slot = joint.clamp(a);
        }
    }

    fn angles(&self) -> &[f64] {
        &self.angles
    }

    fn joint_positions(&self) -> Vec<DVec3> {
        self.forward(&self.angles)
    }

    fn solve_ik(&self, target: DVec3) -> SolveOutcome {
        let tol = self.tuning.tolerance;
        if target.length() > self.max_reach() + tol {
            log::trace!("target {target:?} beyond reach {:.3}", self.max_reach());
            return SolveOutcome::Unreachable;
        }

        let h = self.tuning.gradient_step;
        let lr = self.tuning.learning_rate;
        let mut out = self.angles.clone();
        let mut grad = vec![0.0; out.len()];
        let mut cur = self.effector(&out).distance_squared(target);

        for _ in 0..self.tuning.max_iterations {
            if cur.sqrt() < tol {
                return SolveOutcome::Reached(self.clamped(&out));
            }
            for i in 0..out.len() {
                let backup = out[i];
                out[i] += h;
                let next = self.effector(&out).distance_squared(target);
                grad[i] = (next - cur) / h;
                out[i] = backup;
            }
            for (a, g) in out.iter_mut().zip(&grad) {
                *a -= lr * g;
            }
            cur = self.effector(&out).distance_squared(target);
        }

        if cur.sqrt() < tol {
            SolveOutcome::Reached(self.clamped(&out))
        } else {
            SolveOutcome::Unreachable
        }
    }

    fn max_reach(&self) -> f64 {
        self.joints.iter().map(|j| j.link_length).sum()
    }
}
