//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a slider,
//! a button, or a programmatic call, is represented as an `ArmCommand`.
//! Consumers construct commands and pass them to
//! [`ArmEngine::execute`](super::ArmEngine::execute).

use glam::DVec3;

use super::ArmEngine;
use crate::error::ArmError;
use crate::kinematics::KinematicsSolver;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ArmCommand::StartSession)?;
/// engine.execute(ArmCommand::SetAngle { joint: 2, degrees: 45.0 })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ArmCommand {
    // ── Session ─────────────────────────────────────────────────────
    /// Anchor the effector, then start shaking the mount.
    StartSession,
    /// Release the anchor, then stop shaking and restore the mount.
    StopSession,

    // ── Individual controls ─────────────────────────────────────────
    /// Anchor at the effector's current world position.
    AnchorNow,
    /// Drop the anchor, keeping the last pose.
    Release,
    /// Start shaking the mount.
    Play,
    /// Stop shaking and restore the mount.
    Stop,

    // ── Manual panel ────────────────────────────────────────────────
    /// Move one joint.
    SetAngle {
        /// Joint index.
        joint: usize,
        /// New angle (degrees).
        degrees: f64,
    },
    /// Solve toward a world-space target.
    SetTarget {
        /// Target position.
        position: DVec3,
    },
    /// Zero all joints and restore the default target.
    Reset,
}

impl ArmCommand {
    /// Whether the command is refused while a test session runs.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        !matches!(self, Self::StartSession | Self::StopSession)
    }
}

impl<S: KinematicsSolver> ArmEngine<S> {
    /// Execute a command.
    ///
    /// While a session is running only `StartSession` and `StopSession`
    /// are accepted; anything else is logged and dropped so the session
    /// stays anchored and playing until it is stopped.
    ///
    /// # Errors
    ///
    /// [`ArmError::JointIndex`] for a `SetAngle` outside the chain, or a
    /// solver contract violation.
    pub fn execute(&mut self, command: ArmCommand) -> Result<(), ArmError> {
        if self.session.is_running() && command.is_manual() {
            log::warn!("{command:?} ignored while a test session is running");
            return Ok(());
        }
        log::debug!("execute {command:?}");

        match command {
            ArmCommand::StartSession => {
                self.panel.discard_pending();
                self.session.start(&mut self.chain, self.clock);
            }
            ArmCommand::StopSession => self.session.stop(&mut self.chain),
            ArmCommand::AnchorNow => {
                self.session.stabilizer_mut().anchor_now(&self.chain);
            }
            ArmCommand::Release => self.session.stabilizer_mut().release(),
            ArmCommand::Play => {
                self.session.disturbance_mut().play(&self.chain, self.clock);
            }
            ArmCommand::Stop => {
                self.session.disturbance_mut().stop(&mut self.chain);
            }
            ArmCommand::SetAngle { joint, degrees } => {
                let applied =
                    self.panel
                        .set_angle(&mut self.chain, joint, degrees, self.clock)?;
                if let Some(status) = applied {
                    self.last_status = status;
                }
            }
            ArmCommand::SetTarget { position } => {
                let applied =
                    self.panel.set_target(&mut self.chain, position, self.clock)?;
                if let Some(status) = applied {
                    self.last_status = status;
                }
            }
            ArmCommand::Reset => {
                self.last_status = self.panel.reset(&mut self.chain)?;
            }
        }
        Ok(())
    }
}
