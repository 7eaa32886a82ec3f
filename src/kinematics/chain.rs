//! The joint-angle model and its facade over a [`KinematicsSolver`].
//!
//! Coordinate convention: the solver works in the chain's local frame and
//! [`BaseFrame`] maps local points into the world. Joint positions are
//! reported in world space and [`KinematicChain::solve`] takes a world-space
//! target, so an anchor captured from [`KinematicChain::effector`] can be
//! fed straight back into a solve after the base has moved.

use glam::{DQuat, DVec3};

use super::solver::{KinematicsSolver, SolveOutcome};
use crate::error::ArmError;

/// N+1 world points, mount first, end effector last.
pub type JointPositionBuffer = Vec<DVec3>;

/// Placement of the chain's origin in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseFrame {
    /// World position of the local origin.
    pub offset: DVec3,
    /// Fixed orientation of the local frame.
    pub orientation: DQuat,
}

impl BaseFrame {
    /// Frame at the world origin with no rotation.
    pub const IDENTITY: Self = Self {
        offset: DVec3::ZERO,
        orientation: DQuat::IDENTITY,
    };

    /// Unrotated frame at `offset`.
    #[must_use]
    pub fn at(offset: DVec3) -> Self {
        Self {
            offset,
            orientation: DQuat::IDENTITY,
        }
    }

    /// Map a local point into the world.
    #[must_use]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.offset + self.orientation * local
    }

    /// Map a world point into the local frame.
    #[must_use]
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        self.orientation.inverse() * (world - self.offset)
    }
}

impl Default for BaseFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A serial arm: its joint angles, its base frame, and the solver that owns
/// the kinematics.
///
/// The solver lives exactly as long as the chain. [`shutdown`] consumes the
/// chain, so no operation can reach a released solver.
///
/// [`shutdown`]: KinematicChain::shutdown
#[derive(Debug)]
pub struct KinematicChain<S> {
    solver: S,
    dof: usize,
    angles: Vec<f64>,
    positions: JointPositionBuffer,
    base: BaseFrame,
}

impl<S: KinematicsSolver> KinematicChain<S> {
    /// Wrap `solver`, mounting the chain at `base_position`.
    ///
    /// The degree-of-freedom count is read once here. A solver whose
    /// forward solve does not produce N+1 points is rejected.
    pub fn create(solver: S, base_position: DVec3) -> Result<Self, ArmError> {
        Self::with_base_frame(solver, BaseFrame::at(base_position))
    }

    /// Like [`create`](Self::create) with an explicit orientation.
    pub fn with_base_frame(solver: S, base: BaseFrame) -> Result<Self, ArmError> {
        let dof = solver.joint_count();
        let angles = solver.angles().to_vec();
        if angles.len() != dof {
            return Err(ArmError::Creation(format!(
                "solver reports {dof} joints but stores {} angles",
                angles.len()
            )));
        }
        let local = solver.joint_positions();
        if local.len() != dof + 1 {
            return Err(ArmError::Creation(format!(
                "solver reports {dof} joints but {} positions",
                local.len()
            )));
        }

        let positions = local.iter().map(|&p| base.to_world(p)).collect();
        log::info!(
            "kinematic chain created: {dof} joints, base {:?}, reach {:.2}",
            base.offset,
            solver.max_reach()
        );
        Ok(Self {
            solver,
            dof,
            angles,
            positions,
            base,
        })
    }

    /// Number of joints, fixed for the chain's lifetime.
    #[must_use]
    pub fn degree_of_freedom(&self) -> usize {
        self.dof
    }

    /// Current joint angles in radians.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Current joint angles in degrees.
    #[must_use]
    pub fn angles_deg(&self) -> Vec<f64> {
        self.angles.iter().map(|a| a.to_degrees()).collect()
    }

    /// Store a full pose (radians) and forward-solve it.
    pub fn set_angles(&mut self, angles: &[f64]) -> Result<(), ArmError> {
        if angles.len() != self.dof {
            return Err(ArmError::AngleCount {
                expected: self.dof,
                actual: angles.len(),
            });
        }
        self.solver.set_angles(angles);
        self.angles.clear();
        self.angles.extend_from_slice(self.solver.angles());
        self.refresh_positions();
        Ok(())
    }

    /// Change a single joint (radians), keeping the others.
    pub fn set_angle(&mut self, index: usize, radians: f64) -> Result<(), ArmError> {
        if index >= self.dof {
            return Err(ArmError::JointIndex {
                index,
                count: self.dof,
            });
        }
        let mut angles = self.angles.clone();
        angles[index] = radians;
        self.set_angles(&angles)
    }

    /// World positions of the current pose, mount first.
    #[must_use]
    pub fn joint_positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// World position of the end effector.
    #[must_use]
    pub fn effector(&self) -> DVec3 {
        self.positions.last().copied().unwrap_or(self.base.offset)
    }

    /// Inverse solve toward a world-space target.
    ///
    /// Pure query: the stored pose is untouched whatever the outcome.
    pub fn solve(&self, world_target: DVec3) -> Result<SolveOutcome, ArmError> {
        let local = self.base.to_local(world_target);
        let outcome = self.solver.solve_ik(local);
        if let SolveOutcome::Reached(angles) = &outcome {
            if angles.len() != self.dof {
                return Err(ArmError::AngleCount {
                    expected: self.dof,
                    actual: angles.len(),
                });
            }
        }
        Ok(outcome)
    }

    /// Where the chain is mounted.
    #[must_use]
    pub fn base_frame(&self) -> BaseFrame {
        self.base
    }

    /// Move the chain's mount. World positions follow; angles do not change.
    pub fn set_base_frame(&mut self, base: BaseFrame) {
        self.base = base;
        self.refresh_positions();
    }

    /// Move the mount, keeping its orientation.
    pub fn set_base_offset(&mut self, offset: DVec3) {
        self.set_base_frame(BaseFrame {
            offset,
            ..self.base
        });
    }

    /// The wrapped solver.
    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Log the full chain state at debug level.
    pub fn log_state(&self) {
        log::debug!("=== chain state ===");
        log::debug!("base: {:?}", self.base.offset);
        for (i, a) in self.angles.iter().enumerate() {
            log::debug!("  joint {i}: {a:.4} rad ({:.1} deg)", a.to_degrees());
        }
        for (i, p) in self.positions.iter().enumerate() {
            log::debug!("  position {i}: {p:?}");
        }
        log::debug!("effector: {:?}", self.effector());
        log::debug!("max reach: {:.3}", self.solver.max_reach());
    }

    /// Release the solver. The chain cannot be used afterwards.
    pub fn shutdown(self) {
        log::info!("kinematic chain shut down, solver released");
        drop(self.solver);
    }

    fn refresh_positions(&mut self) {
        let base = self.base;
        self.positions.clear();
        self.positions.extend(
            self.solver
                .joint_positions()
                .into_iter()
                .map(|p| base.to_world(p)),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::kinematics::PlanarTwoLinkSolver;
    use crate::kinematics::SerialArmSolver;
    use crate::options::{ArmOptions, SolverOptions};

    fn planar_chain() -> KinematicChain<PlanarTwoLinkSolver> {
        let solver = PlanarTwoLinkSolver::new(2.0, 1.5).unwrap();
        KinematicChain::create(solver, DVec3::ZERO).unwrap()
    }

    fn serial_chain() -> KinematicChain<SerialArmSolver> {
        let solver = SerialArmSolver::create(
            &ArmOptions::default(),
            &SolverOptions::default(),
        )
        .unwrap();
        KinematicChain::create(solver, DVec3::ZERO).unwrap()
    }

    #[test]
    fn buffer_has_one_more_point_than_joints() {
        let mut chain = serial_chain();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let angles: Vec<f64> = (0..chain.degree_of_freedom())
                .map(|_| rng.random_range(-3.0..3.0))
                .collect();
            chain.set_angles(&angles).unwrap();
            let first = chain.joint_positions().to_vec();
            assert_eq!(first.len(), chain.degree_of_freedom() + 1);

            chain.set_angles(&angles).unwrap();
            assert_eq!(chain.joint_positions(), &first[..]);
        }
    }

    #[test]
    fn wrong_length_is_a_contract_violation() {
        let mut chain = planar_chain();
        let before = chain.angles().to_vec();
        let err = chain.set_angles(&[0.1, 0.2, 0.3]).unwrap_err();
        assert!(matches!(
            err,
            ArmError::AngleCount {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(chain.angles(), &before[..]);
    }

    #[test]
    fn set_angle_rejects_bad_index() {
        let mut chain = planar_chain();
        assert!(matches!(
            chain.set_angle(5, 0.0),
            Err(ArmError::JointIndex { index: 5, count: 2 })
        ));
        chain.set_angle(1, FRAC_PI_2).unwrap();
        assert_eq!(chain.angles()[1], FRAC_PI_2);
    }

    #[test]
    fn base_offset_moves_world_positions_only() {
        let mut chain = planar_chain();
        let effector = chain.effector();
        let angles = chain.angles().to_vec();
        chain.set_base_offset(DVec3::new(0.5, -0.25, 0.0));
        assert!((chain.effector() - effector - DVec3::new(0.5, -0.25, 0.0)).length() < 1e-12);
        assert_eq!(chain.angles(), &angles[..]);
    }

    #[test]
    fn solve_is_a_pure_query() {
        let chain = planar_chain();
        let before = chain.angles().to_vec();
        let positions = chain.joint_positions().to_vec();
        let outcome = chain.solve(DVec3::new(1.0, 2.0, 0.0)).unwrap();
        assert!(outcome.is_reached());
        assert_eq!(chain.angles(), &before[..]);
        assert_eq!(chain.joint_positions(), &positions[..]);
    }

    #[test]
    fn solve_maps_world_target_into_local_frame() {
        let mut chain = planar_chain();
        chain.set_base_offset(DVec3::new(10.0, 0.0, 0.0));
        // 3.0 from the moved base, well inside reach
        let outcome = chain.solve(DVec3::new(13.0, 0.0, 0.0)).unwrap();
        let mut probe = planar_chain();
        probe.set_base_offset(DVec3::new(10.0, 0.0, 0.0));
        probe.set_angles(outcome.angles().unwrap()).unwrap();
        assert!((probe.effector() - DVec3::new(13.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn beyond_reach_is_unreachable_and_pose_unchanged() {
        let chain = serial_chain();
        let before = chain.angles().to_vec();
        let far = DVec3::new(0.0, chain.solver().max_reach() + 1.0, 0.0);
        assert_eq!(chain.solve(far).unwrap(), SolveOutcome::Unreachable);
        assert_eq!(chain.angles(), &before[..]);
    }

    #[test]
    fn rotated_base_frame_round_trips_points() {
        let frame = BaseFrame {
            offset: DVec3::new(1.0, 2.0, 3.0),
            orientation: DQuat::from_rotation_y(0.7),
        };
        let p = DVec3::new(-0.4, 5.0, 2.0);
        assert!((frame.to_local(frame.to_world(p)) - p).length() < 1e-12);
    }
}
