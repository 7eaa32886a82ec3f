//! Read-only queries and runtime reconfiguration for [`ArmEngine`].

use glam::DVec3;

use super::ArmEngine;
use crate::control::{Smoothing, TestSession, TickOutcome};
use crate::error::ArmError;
use crate::interactive::InteractiveParameterController;
use crate::kinematics::{KinematicChain, KinematicsSolver, SolveStatus};
use crate::options::Options;

// ── State ──

impl<S: KinematicsSolver> ArmEngine<S> {
    /// The arm.
    #[must_use]
    pub fn chain(&self) -> &KinematicChain<S> {
        &self.chain
    }

    /// Stabilizer, disturbance and session state.
    #[must_use]
    pub fn session(&self) -> &TestSession {
        &self.session
    }

    /// Manual slider surface.
    #[must_use]
    pub fn panel(&self) -> &InteractiveParameterController {
        &self.panel
    }

    /// Simulation time in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// The "last solve succeeded" signal.
    #[must_use]
    pub fn status(&self) -> SolveStatus {
        self.last_status
    }

    /// What the most recent stabilization tick did.
    #[must_use]
    pub fn last_tick(&self) -> TickOutcome {
        self.last_tick
    }

    /// End effector position.
    #[must_use]
    pub fn effector(&self) -> DVec3 {
        self.chain.effector()
    }

    /// Held anchor point, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<DVec3> {
        self.session.stabilizer().anchor().map(|a| a.point)
    }
}

// ── Pose ──

impl<S: KinematicsSolver> ArmEngine<S> {
    /// Put the arm in a full pose (degrees) immediately, bypassing the
    /// slider throttle. Ignored while a session is running.
    ///
    /// # Errors
    ///
    /// [`ArmError::AngleCount`] unless there is one angle per joint.
    pub fn set_pose_deg(&mut self, degrees: &[f64]) -> Result<(), ArmError> {
        if self.session.is_running() {
            log::warn!("pose change ignored while a test session is running");
            return Ok(());
        }
        let radians: Vec<f64> = degrees.iter().map(|d| d.to_radians()).collect();
        self.chain.set_angles(&radians)?;
        self.panel.discard_pending();
        self.panel.sync_from_chain(&self.chain);
        self.last_status = SolveStatus::Reached;
        Ok(())
    }
}

// ── Options ──

impl<S: KinematicsSolver> ArmEngine<S> {
    /// Options the engine was built from, with later smoothing and
    /// disturbance changes folded in.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Change smoothing on the fly.
    pub fn set_smoothing(&mut self, enabled: bool, lerp_speed: f64) {
        self.options.stabilizer.smooth = enabled;
        self.options.stabilizer.lerp_speed = lerp_speed;
        self.session
            .stabilizer_mut()
            .set_smoothing(Smoothing::from(&self.options.stabilizer));
    }

    /// Change the disturbance profile on the fly.
    pub fn set_disturbance(&mut self, amplitude: DVec3, frequency: DVec3) {
        self.options.disturbance.amplitude = amplitude.to_array();
        self.options.disturbance.frequency = frequency.to_array();
        self.session
            .disturbance_mut()
            .set_profile(amplitude, frequency);
    }
}
