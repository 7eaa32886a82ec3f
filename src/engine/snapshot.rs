//! Per-tick render state.
//!
//! The engine does not draw anything. Each tick it hands out an
//! [`ArmSnapshot`]: world joint positions plus everything a renderer or UI
//! needs to place links, tint the effector and fill in labels.

use glam::{DQuat, DVec3};

use super::ArmEngine;
use crate::control::SessionState;
use crate::kinematics::{KinematicsSolver, SolveStatus};

/// Rod connecting two consecutive joints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSegment {
    /// Joint at the mount side.
    pub start: DVec3,
    /// Joint at the effector side.
    pub end: DVec3,
    /// Halfway point, where a centered rod mesh goes.
    pub midpoint: DVec3,
    /// Distance between the joints.
    pub length: f64,
    /// Rotation taking +Y onto the link direction.
    pub rotation: DQuat,
}

impl LinkSegment {
    /// Segment from `start` to `end`.
    #[must_use]
    pub fn between(start: DVec3, end: DVec3) -> Self {
        let delta = end - start;
        let direction = delta.normalize_or_zero();
        // Degenerate links keep the rest orientation
        let rotation = if direction.length_squared() > 1e-4 {
            DQuat::from_rotation_arc(DVec3::Y, direction)
        } else {
            DQuat::IDENTITY
        };
        Self {
            start,
            end,
            midpoint: (start + end) / 2.0,
            length: delta.length(),
            rotation,
        }
    }
}

/// Everything the render layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmSnapshot {
    /// Simulation time of the snapshot (seconds).
    pub time: f64,
    /// N+1 world points, mount first.
    pub joint_positions: Vec<DVec3>,
    /// N rods between consecutive joints.
    pub links: Vec<LinkSegment>,
    /// End effector position.
    pub effector: DVec3,
    /// Joint angles (degrees).
    pub angles_deg: Vec<f64>,
    /// Whether the last solve succeeded (effector tint).
    pub solve_reached: bool,
    /// Status line, `"IK: OK"` or `"IK: Unreachable"`.
    pub status_text: &'static str,
    /// Test session state.
    pub session: SessionState,
    /// Held anchor point, if any.
    pub anchor: Option<DVec3>,
    /// Current mount offset.
    pub base_offset: DVec3,
    /// Panel labels: one per joint, then X, Y and Z.
    pub labels: Vec<String>,
}

impl ArmSnapshot {
    /// Distance between the effector and the anchor, while anchored.
    #[must_use]
    pub fn drift(&self) -> Option<f64> {
        self.anchor.map(|a| a.distance(self.effector))
    }
}

impl<S: KinematicsSolver> ArmEngine<S> {
    /// Render state of the current pose.
    #[must_use]
    pub fn snapshot(&self) -> ArmSnapshot {
        let joint_positions = self.chain.joint_positions().to_vec();
        let links = joint_positions
            .windows(2)
            .map(|pair| LinkSegment::between(pair[0], pair[1]))
            .collect();
        ArmSnapshot {
            time: self.clock,
            links,
            effector: self.chain.effector(),
            joint_positions,
            angles_deg: self.chain.angles_deg(),
            solve_reached: self.last_status == SolveStatus::Reached,
            status_text: self.last_status.text(),
            session: self.session.state(),
            anchor: self.anchor(),
            base_offset: self.chain.base_frame().offset,
            labels: self.panel.labels(),
        }
    }
}
