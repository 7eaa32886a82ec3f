//! Closed-loop anchor/compensate controller.
//!
//! While anchored, every tick re-solves the chain toward the anchor point,
//! which sits still in the world while the mount moves underneath it, and
//! blends the joint angles toward the solution.

use glam::DVec3;

use super::smoothing::Smoothing;
use crate::error::ArmError;
use crate::kinematics::{KinematicChain, KinematicsSolver, SolveOutcome};

/// World point held by the controller, with the pose it was captured from.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// World-space point the effector is kept on.
    pub point: DVec3,
    /// Joint angles at capture time (radians).
    pub baseline: Vec<f64>,
}

/// What one stabilization tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Released: nothing to do.
    Idle,
    /// The anchor is out of reach this tick; angles untouched.
    Unreachable,
    /// New angles were applied.
    Corrected,
}

/// Anchor/release state machine driving the correction loop.
#[derive(Debug, Clone, Default)]
pub struct StabilizationController {
    smoothing: Smoothing,
    anchor: Option<Anchor>,
}

impl StabilizationController {
    /// Released controller with the given smoothing.
    #[must_use]
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            smoothing,
            anchor: None,
        }
    }

    /// Current smoothing.
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Change smoothing. Takes effect on the next tick.
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoothing = smoothing;
    }

    /// Whether an anchor is held.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// The held anchor, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Capture the effector's current world position as the anchor.
    ///
    /// Calling this while anchored re-bases onto the current pose.
    pub fn anchor_now<S: KinematicsSolver>(&mut self, chain: &KinematicChain<S>) {
        let anchor = Anchor {
            point: chain.effector(),
            baseline: chain.angles().to_vec(),
        };
        if self.anchor.is_some() {
            log::info!("re-anchored at {:?}", anchor.point);
        } else {
            log::info!("anchored at {:?}", anchor.point);
        }
        self.anchor = Some(anchor);
    }

    /// Drop the anchor. The arm keeps its last solved pose.
    pub fn release(&mut self) {
        if self.anchor.take().is_some() {
            log::info!("anchor released");
        }
    }

    /// One control step of `dt` seconds.
    ///
    /// An unreachable anchor is not an error: the pose is held and the solve
    /// is retried next tick. `before` is always read from the live pose, so a
    /// failed tick never leaves a stale smoothing baseline behind.
    pub fn tick<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        dt: f64,
    ) -> Result<TickOutcome, ArmError> {
        let Some(anchor) = &self.anchor else {
            return Ok(TickOutcome::Idle);
        };

        let before = chain.angles().to_vec();
        let target = match chain.solve(anchor.point)? {
            SolveOutcome::Reached(angles) => angles,
            SolveOutcome::Unreachable => {
                log::debug!("anchor {:?} unreachable, holding pose", anchor.point);
                return Ok(TickOutcome::Unreachable);
            }
        };

        let next = self.smoothing.apply(&before, &target, dt);
        chain.set_angles(&next)?;
        Ok(TickOutcome::Corrected)
    }
}
