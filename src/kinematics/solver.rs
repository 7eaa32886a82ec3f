//! The seam between the control core and a kinematics engine.

use glam::DVec3;

/// Outcome of an inverse-kinematics query.
///
/// A solver never hands back a partial solution: either every joint angle
/// needed to reach the target, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// The target is reachable with these joint angles (radians).
    Reached(Vec<f64>),
    /// No solution within the solver's tolerance and budget.
    Unreachable,
}

impl SolveOutcome {
    /// Whether the target was reached.
    #[must_use]
    pub fn is_reached(&self) -> bool {
        matches!(self, Self::Reached(_))
    }

    /// Solved angles, if any.
    #[must_use]
    pub fn angles(&self) -> Option<&[f64]> {
        match self {
            Self::Reached(angles) => Some(angles),
            Self::Unreachable => None,
        }
    }

    /// Reached/unreachable status without the payload.
    #[must_use]
    pub fn status(&self) -> SolveStatus {
        if self.is_reached() {
            SolveStatus::Reached
        } else {
            SolveStatus::Unreachable
        }
    }
}

/// The "last solve succeeded" signal shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStatus {
    /// Last solve (or manual pose) is valid.
    #[default]
    Reached,
    /// Last solve failed; the arm holds its previous pose.
    Unreachable,
}

impl SolveStatus {
    /// Whether the status is [`SolveStatus::Reached`].
    #[must_use]
    pub fn is_reached(self) -> bool {
        self == Self::Reached
    }

    /// Status line text.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Reached => "IK: OK",
            Self::Unreachable => "IK: Unreachable",
        }
    }
}

/// A kinematics engine driving one serial chain.
///
/// All coordinates are in the chain's local frame: the mount sits wherever
/// the solver puts it and the [`KinematicChain`](super::KinematicChain)
/// maps local points to the world. The joint count is fixed for the
/// solver's lifetime.
pub trait KinematicsSolver {
    /// Number of independently controllable joints (N).
    fn joint_count(&self) -> usize;

    /// Store a pose. Callers always pass exactly N radians; solvers may
    /// clamp individual angles to their joint limits.
    fn set_angles(&mut self, angles: &[f64]);

    /// The stored pose after any clamping, N entries.
    fn angles(&self) -> &[f64];

    /// Forward solve of the stored pose: N+1 local points, mount first,
    /// end effector last.
    fn joint_positions(&self) -> Vec<DVec3>;

    /// Inverse solve toward a local-frame target. Must not change the
    /// stored pose.
    fn solve_ik(&self, target: DVec3) -> SolveOutcome;

    /// Distance from the mount beyond which no pose can reach.
    fn max_reach(&self) -> f64;
}
