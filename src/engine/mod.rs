//! The engine that owns the chain and drives it tick by tick.

mod accessors;
pub mod command;
pub mod snapshot;

pub use command::ArmCommand;
pub use snapshot::{ArmSnapshot, LinkSegment};

use crate::control::{
    DisturbanceGenerator, Smoothing, StabilizationController, TestSession,
    TickOutcome,
};
use crate::error::ArmError;
use crate::interactive::InteractiveParameterController;
use crate::kinematics::{
    KinematicChain, KinematicsSolver, SerialArmSolver, SolveStatus,
};
use crate::options::Options;

/// The stabilization rig: one arm, its test session and its manual panel.
///
/// # Construction
///
/// Use [`ArmEngine::from_options`] for the built-in serial arm or
/// [`ArmEngine::new`] to drive any [`KinematicsSolver`].
///
/// # Tick loop
///
/// Each tick, call [`update`](Self::update) with the elapsed time. It runs
/// the disturbance, then the stabilizer, then any deferred slider applies,
/// and returns the [`ArmSnapshot`] to draw. Input arrives as
/// [`ArmCommand`]s through [`execute`](Self::execute).
///
/// # Ownership
///
/// The engine is the single writer of the chain; every component borrows it
/// for the duration of one call. [`shutdown`](Self::shutdown) consumes the
/// engine and releases the solver.
#[derive(Debug)]
pub struct ArmEngine<S> {
    /// The arm being stabilized.
    chain: KinematicChain<S>,
    /// Stabilizer and disturbance, started and stopped together.
    session: TestSession,
    /// Manual angle/target sliders.
    panel: InteractiveParameterController,
    /// Simulation time (seconds since construction).
    clock: f64,
    /// Whether the last solve or manual pose succeeded.
    last_status: SolveStatus,
    /// Result of the most recent stabilization tick.
    last_tick: TickOutcome,
    /// Options the engine was built from.
    options: Options,
}

// =============================================================================
// Core
// =============================================================================

impl<S: KinematicsSolver> ArmEngine<S> {
    /// Engine over `solver`, configured from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Creation`] if the solver does not describe a
    /// consistent chain.
    pub fn new(options: &Options, solver: S) -> Result<Self, ArmError> {
        let chain = KinematicChain::create(solver, options.arm.base_position())?;
        let session = TestSession::new(
            StabilizationController::new(Smoothing::from(&options.stabilizer)),
            DisturbanceGenerator::from_options(&options.disturbance),
        );
        let panel = InteractiveParameterController::new(options, &chain);
        chain.log_state();

        Ok(Self {
            chain,
            session,
            panel,
            clock: 0.0,
            last_status: SolveStatus::Reached,
            last_tick: TickOutcome::Idle,
            options: options.clone(),
        })
    }

    /// Advance the simulation by `dt` seconds and return what to draw.
    ///
    /// Order within the tick is fixed: disturbance update, stabilization
    /// tick, deferred panel applies, snapshot.
    ///
    /// # Errors
    ///
    /// Only on a solver contract violation (wrong-length angle vector).
    pub fn update(&mut self, dt: f64) -> Result<ArmSnapshot, ArmError> {
        let dt = dt.max(0.0);
        self.clock += dt;

        self.last_tick = self.session.tick(&mut self.chain, self.clock, dt)?;
        match self.last_tick {
            TickOutcome::Idle => {}
            TickOutcome::Unreachable => {
                self.last_status = SolveStatus::Unreachable;
            }
            TickOutcome::Corrected => {
                self.last_status = SolveStatus::Reached;
                self.panel.sync_from_chain(&self.chain);
            }
        }

        if !self.session.is_running() {
            if let Some(status) = self.panel.flush(&mut self.chain, self.clock)? {
                self.last_status = status;
            }
        }

        Ok(self.snapshot())
    }

    /// Release the solver. The engine cannot be used afterwards.
    pub fn shutdown(self) {
        log::info!("engine shutting down at t={:.3}", self.clock);
        self.chain.shutdown();
    }
}

impl ArmEngine<SerialArmSolver> {
    /// Engine over the built-in serial arm described by `options.arm`.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Creation`] if the arm geometry or solver tuning
    /// is invalid.
    pub fn from_options(options: &Options) -> Result<Self, ArmError> {
        let solver = SerialArmSolver::create(&options.arm, &options.solver)?;
        Self::new(options, solver)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::control::SessionState;
    use crate::kinematics::PlanarTwoLinkSolver;

    const DT: f64 = 1.0 / 60.0;

    fn planar_options() -> Options {
        let mut options = Options::default();
        // Keep the shake in the planar arm's plane
        options.disturbance.amplitude = [0.2, 0.1, 0.0];
        options.disturbance.frequency = [0.5, 0.7, 0.0];
        options.stabilizer.lerp_speed = 40.0;
        options.panel.target_y = [-4.0, 4.0];
        options.panel.target_z = [-1.0, 1.0];
        options
    }

    fn planar_engine() -> ArmEngine<PlanarTwoLinkSolver> {
        let solver = PlanarTwoLinkSolver::new(2.0, 1.5).unwrap();
        let mut engine = ArmEngine::new(&planar_options(), solver).unwrap();
        engine
            .execute(ArmCommand::SetAngle {
                joint: 1,
                degrees: 60.0,
            })
            .unwrap();
        engine
    }

    #[test]
    fn default_engine_builds_serial_arm() {
        let engine = ArmEngine::from_options(&Options::default()).unwrap();
        assert_eq!(engine.chain().degree_of_freedom(), 4);
        assert!((engine.effector().y - 8.5).abs() < 1e-9);
        assert_eq!(engine.status(), SolveStatus::Reached);
        engine.shutdown();
    }

    #[test]
    fn invalid_arm_is_a_creation_error() {
        let mut options = Options::default();
        options.arm.joints.clear();
        let err = ArmEngine::from_options(&options).unwrap_err();
        assert!(matches!(err, ArmError::Creation(_)));
    }

    #[test]
    fn session_holds_effector_and_restores_base() {
        let mut engine = planar_engine();
        let base = engine.chain().base_frame();
        engine.execute(ArmCommand::StartSession).unwrap();
        let anchor = engine.anchor().unwrap();

        let mut worst: f64 = 0.0;
        for i in 0..600 {
            let snapshot = engine.update(DT).unwrap();
            assert!(snapshot.solve_reached);
            assert_eq!(snapshot.session, SessionState::Running);
            if i > 60 {
                worst = worst.max(snapshot.effector.distance(anchor));
            }
        }
        assert!(worst < 0.05, "worst drift {worst}");

        engine.execute(ArmCommand::StopSession).unwrap();
        assert_eq!(engine.chain().base_frame(), base);
        assert!(engine.anchor().is_none());
        assert!(!engine.session().disturbance().is_playing());
    }

    #[test]
    fn manual_commands_are_rejected_while_running() {
        let mut engine = planar_engine();
        engine.execute(ArmCommand::StartSession).unwrap();
        let _ = engine.update(DT).unwrap();
        let angles = engine.chain().angles().to_vec();

        engine
            .execute(ArmCommand::SetAngle {
                joint: 0,
                degrees: 90.0,
            })
            .unwrap();
        engine.execute(ArmCommand::Release).unwrap();
        engine.execute(ArmCommand::Stop).unwrap();
        engine.execute(ArmCommand::Reset).unwrap();

        assert_eq!(engine.chain().angles(), angles.as_slice());
        assert!(engine.session().stabilizer().is_anchored());
        assert!(engine.session().disturbance().is_playing());
        assert!(engine.session().is_running());
    }

    #[test]
    fn session_triggers_are_idempotent() {
        let mut engine = planar_engine();
        engine.execute(ArmCommand::StopSession).unwrap();
        assert_eq!(engine.session().state(), SessionState::Idle);

        engine.execute(ArmCommand::StartSession).unwrap();
        let anchor = engine.anchor();
        let _ = engine.update(0.3).unwrap();
        engine.execute(ArmCommand::StartSession).unwrap();
        assert_eq!(engine.anchor(), anchor);
    }

    #[test]
    fn target_command_solves_and_resyncs_readout() {
        let mut engine = planar_engine();
        let target = DVec3::new(0.5, 2.5, 0.0);
        engine
            .execute(ArmCommand::SetTarget { position: target })
            .unwrap();
        assert_eq!(engine.status(), SolveStatus::Reached);
        assert!(engine.effector().distance(target) < 1e-9);
        assert_eq!(engine.panel().target(), engine.effector());
    }

    #[test]
    fn unreachable_target_sets_status_and_keeps_pose() {
        let mut engine = planar_engine();
        let angles = engine.chain().angles().to_vec();
        engine
            .execute(ArmCommand::SetTarget {
                position: DVec3::new(4.9, 0.0, 0.0),
            })
            .unwrap();
        assert_eq!(engine.status(), SolveStatus::Unreachable);
        assert_eq!(engine.chain().angles(), angles.as_slice());
        let snapshot = engine.update(DT).unwrap();
        assert!(!snapshot.solve_reached);
        assert_eq!(snapshot.status_text, "IK: Unreachable");
    }

    #[test]
    fn throttled_slider_is_applied_by_update() {
        let mut engine = planar_engine();
        // The fixture's SetAngle opened the gate at t=0
        engine
            .execute(ArmCommand::SetAngle {
                joint: 0,
                degrees: 30.0,
            })
            .unwrap();
        assert!(engine.chain().angles()[0].abs() < 1e-12);
        assert_eq!(engine.panel().angles_deg()[0], 30.0);

        for _ in 0..10 {
            let _ = engine.update(0.02).unwrap();
        }
        assert!((engine.chain().angles()[0] - 30_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn reset_zeroes_pose_and_status() {
        let mut engine = planar_engine();
        engine
            .execute(ArmCommand::SetTarget {
                position: DVec3::new(4.9, 0.0, 0.0),
            })
            .unwrap();
        engine.execute(ArmCommand::Reset).unwrap();
        assert_eq!(engine.status(), SolveStatus::Reached);
        assert!(engine.chain().angles().iter().all(|a| a.abs() < 1e-9));
        assert_eq!(engine.panel().target(), DVec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn manual_anchor_while_idle_is_stabilized() {
        let mut engine = planar_engine();
        engine.execute(ArmCommand::AnchorNow).unwrap();
        engine.execute(ArmCommand::Play).unwrap();
        assert_eq!(engine.session().state(), SessionState::Idle);
        let anchor = engine.anchor().unwrap();
        for _ in 0..120 {
            let _ = engine.update(DT).unwrap();
        }
        assert!(engine.effector().distance(anchor) < 0.05);
        engine.execute(ArmCommand::Stop).unwrap();
        engine.execute(ArmCommand::Release).unwrap();
        assert!(engine.anchor().is_none());
        assert_eq!(engine.chain().base_frame().offset, DVec3::ZERO);
    }
}
