//! Manual override surface: joint-angle and target sliders.
//!
//! Every incoming value updates the readout immediately. Writes to the
//! chain go through a per-surface [`Throttle`]: the first change in an
//! interval is applied on the spot, later ones are held as pending and the
//! newest pending value is applied by [`flush`](InteractiveParameterController::flush)
//! once the interval has passed. A fast drag therefore costs at most one
//! solve per interval and the final slider position is never lost.

use glam::DVec3;

use super::throttle::Throttle;
use crate::error::ArmError;
use crate::kinematics::{KinematicChain, KinematicsSolver, SolveOutcome, SolveStatus};
use crate::options::{Axis, Options};

/// Slider range for joints the arm options do not describe.
const DEFAULT_JOINT_RANGE: (f64, f64) = (-180.0, 180.0);

/// Per-joint angle sliders plus a 3D target, each rate-limited.
#[derive(Debug, Clone)]
pub struct InteractiveParameterController {
    joint_ranges: Vec<(f64, f64)>,
    target_ranges: [(f64, f64); 3],
    reset_target: DVec3,
    /// Displayed joint angles (degrees)
    angles_deg: Vec<f64>,
    /// Displayed target / effector position
    target: DVec3,
    pending_angles: Vec<Option<f64>>,
    pending_target: Option<DVec3>,
    angle_gate: Throttle,
    target_gate: Throttle,
    applies: u64,
}

impl InteractiveParameterController {
    /// Panel for a chain of `dof` joints configured from `options`, with
    /// the readout taken from `chain`.
    #[must_use]
    pub fn new<S: KinematicsSolver>(options: &Options, chain: &KinematicChain<S>) -> Self {
        let dof = chain.degree_of_freedom();
        let configured = options.arm.joint_ranges_deg();
        let joint_ranges = (0..dof)
            .map(|i| configured.get(i).copied().unwrap_or(DEFAULT_JOINT_RANGE))
            .collect();
        Self {
            joint_ranges,
            target_ranges: options.panel.target_ranges(),
            reset_target: options.panel.reset_target(),
            angles_deg: chain.angles_deg(),
            target: chain.effector(),
            pending_angles: vec![None; dof],
            pending_target: None,
            angle_gate: Throttle::new(options.panel.angle_interval_secs()),
            target_gate: Throttle::new(options.panel.target_interval_secs()),
            applies: 0,
        }
    }

    /// Slider range of joint `index` in degrees.
    #[must_use]
    pub fn joint_range(&self, index: usize) -> Option<(f64, f64)> {
        self.joint_ranges.get(index).copied()
    }

    /// Slider range of one target axis.
    #[must_use]
    pub fn target_range(&self, axis: Axis) -> (f64, f64) {
        self.target_ranges[axis.index()]
    }

    /// Displayed joint angles (degrees).
    #[must_use]
    pub fn angles_deg(&self) -> &[f64] {
        &self.angles_deg
    }

    /// Displayed target position.
    #[must_use]
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Number of writes the panel has made to the chain.
    #[must_use]
    pub fn applies(&self) -> u64 {
        self.applies
    }

    /// Whether a throttled value is waiting for [`flush`](Self::flush).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_target.is_some() || self.pending_angles.iter().any(Option::is_some)
    }

    /// Label for joint `index`, e.g. `"Joint 2: 45.0°"`.
    #[must_use]
    pub fn joint_label(&self, index: usize) -> Option<String> {
        self.angles_deg
            .get(index)
            .map(|deg| format!("Joint {index}: {deg:.1}°"))
    }

    /// Label for one axis of the target readout, e.g. `"X: 1.5"`.
    #[must_use]
    pub fn axis_label(&self, axis: Axis) -> String {
        format!("{}: {:.1}", axis.label(), axis.component(self.target))
    }

    /// All joint labels, then the X, Y and Z labels.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (0..self.angles_deg.len())
            .filter_map(|i| self.joint_label(i))
            .chain(Axis::ALL.iter().map(|&axis| self.axis_label(axis)))
            .collect()
    }

    /// Move joint `index` to `degrees` (clamped to the slider range).
    ///
    /// Returns the status when the change reached the chain, `None` when it
    /// was held back by the throttle.
    pub fn set_angle<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        index: usize,
        degrees: f64,
        now: f64,
    ) -> Result<Option<SolveStatus>, ArmError> {
        let Some(&(lo, hi)) = self.joint_ranges.get(index) else {
            return Err(ArmError::JointIndex {
                index,
                count: self.joint_ranges.len(),
            });
        };
        let degrees = degrees.clamp(lo, hi);
        self.angles_deg[index] = degrees;
        self.pending_angles[index] = Some(degrees);

        if !self.angle_gate.ready(now) {
            log::trace!("joint {index} -> {degrees:.1}° held by throttle");
            return Ok(None);
        }
        self.apply_angles(chain).map(Some)
    }

    /// Move the target to `position` (clamped per axis) and solve toward it.
    ///
    /// Same throttling contract as [`set_angle`](Self::set_angle).
    pub fn set_target<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        position: DVec3,
        now: f64,
    ) -> Result<Option<SolveStatus>, ArmError> {
        let position = self.clamp_target(position);
        self.target = position;
        self.pending_target = Some(position);

        if !self.target_gate.ready(now) {
            log::trace!("target -> {position:?} held by throttle");
            return Ok(None);
        }
        self.apply_target(chain).map(Some)
    }

    /// Apply whatever is pending and allowed at `now`.
    ///
    /// Angles go first so a pending target solve starts from them. The
    /// status of the last write is returned, `None` if nothing was written.
    pub fn flush<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        now: f64,
    ) -> Result<Option<SolveStatus>, ArmError> {
        let mut status = None;
        if self.pending_angles.iter().any(Option::is_some) && self.angle_gate.ready(now) {
            status = Some(self.apply_angles(chain)?);
        }
        if self.pending_target.is_some() && self.target_gate.ready(now) {
            status = Some(self.apply_target(chain)?);
        }
        Ok(status)
    }

    /// Zero every joint, restore the default target readout and re-solve
    /// against the resulting pose.
    ///
    /// Pending slider values are dropped. The readout keeps the default
    /// target instead of being re-synced from the zeroed pose.
    pub fn reset<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
    ) -> Result<SolveStatus, ArmError> {
        self.discard_pending();
        self.angle_gate.reset();
        self.target_gate.reset();

        chain.set_angles(&vec![0.0; chain.degree_of_freedom()])?;
        self.target = self.reset_target;

        let status = match chain.solve(chain.effector())? {
            SolveOutcome::Reached(angles) => {
                chain.set_angles(&angles)?;
                SolveStatus::Reached
            }
            SolveOutcome::Unreachable => SolveStatus::Unreachable,
        };
        self.angles_deg = chain.angles_deg();
        self.applies += 1;
        log::info!("panel reset ({})", status.text());
        Ok(status)
    }

    /// Drop throttled values without applying them.
    pub fn discard_pending(&mut self) {
        if self.has_pending() {
            log::debug!("discarding pending slider values");
        }
        self.pending_angles.fill(None);
        self.pending_target = None;
    }

    /// Copy the chain's current angles and effector into the readout.
    pub fn sync_from_chain<S: KinematicsSolver>(&mut self, chain: &KinematicChain<S>) {
        self.angles_deg = chain.angles_deg();
        self.target = chain.effector();
    }

    fn clamp_target(&self, position: DVec3) -> DVec3 {
        let mut out = position;
        for axis in Axis::ALL {
            let (lo, hi) = self.target_ranges[axis.index()];
            out[axis.index()] = position[axis.index()].clamp(lo, hi);
        }
        out
    }

    fn apply_angles<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
    ) -> Result<SolveStatus, ArmError> {
        let mut angles = chain.angles().to_vec();
        for (slot, pending) in angles.iter_mut().zip(self.pending_angles.iter_mut()) {
            if let Some(deg) = pending.take() {
                *slot = deg.to_radians();
            }
        }
        chain.set_angles(&angles)?;
        self.applies += 1;
        self.sync_from_chain(chain);
        Ok(SolveStatus::Reached)
    }

    fn apply_target<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
    ) -> Result<SolveStatus, ArmError> {
        let Some(target) = self.pending_target.take() else {
            return Ok(SolveStatus::Reached);
        };
        self.applies += 1;
        match chain.solve(target)? {
            SolveOutcome::Reached(angles) => {
                chain.set_angles(&angles)?;
                // The reached pose may sit slightly off the request
                self.sync_from_chain(chain);
                Ok(SolveStatus::Reached)
            }
            SolveOutcome::Unreachable => {
                log::debug!("target {target:?} unreachable, holding pose");
                Ok(SolveStatus::Unreachable)
            }
        }
    }
}
