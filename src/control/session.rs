//! Start/stop orchestration of a disturbance-and-compensate test.

use super::disturbance::DisturbanceGenerator;
use super::stabilizer::{StabilizationController, TickOutcome};
use crate::error::ArmError;
use crate::kinematics::{KinematicChain, KinematicsSolver};

/// Whether a test is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No test running.
    #[default]
    Idle,
    /// Anchored and shaking.
    Running,
}

/// Owns the stabilizer and the disturbance and moves them together.
///
/// `Running` always means anchored and playing; the only way in or out is
/// through [`start`](Self::start) and [`stop`](Self::stop), which keep both
/// halves in step.
#[derive(Debug, Clone, Default)]
pub struct TestSession {
    stabilizer: StabilizationController,
    disturbance: DisturbanceGenerator,
    state: SessionState,
}

impl TestSession {
    /// Idle session over the given components.
    #[must_use]
    pub fn new(
        stabilizer: StabilizationController,
        disturbance: DisturbanceGenerator,
    ) -> Self {
        Self {
            stabilizer,
            disturbance,
            state: SessionState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a test is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// The stabilization controller.
    #[must_use]
    pub fn stabilizer(&self) -> &StabilizationController {
        &self.stabilizer
    }

    /// Mutable access to the stabilizer for manual use while idle.
    pub fn stabilizer_mut(&mut self) -> &mut StabilizationController {
        &mut self.stabilizer
    }

    /// The disturbance generator.
    #[must_use]
    pub fn disturbance(&self) -> &DisturbanceGenerator {
        &self.disturbance
    }

    /// Mutable access to the disturbance for manual use while idle.
    pub fn disturbance_mut(&mut self) -> &mut DisturbanceGenerator {
        &mut self.disturbance
    }

    /// Anchor, then play, then mark running. No-op while running.
    ///
    /// The anchor is taken first so it records the undisturbed effector. A
    /// shake left playing from manual control is stopped beforehand, which
    /// puts the mount back on its origin.
    pub fn start<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        now: f64,
    ) {
        if self.is_running() {
            return;
        }
        if self.disturbance.is_playing() {
            log::debug!("stopping manual shake before anchoring");
            self.disturbance.stop(chain);
        }
        self.stabilizer.anchor_now(chain);
        self.disturbance.play(chain, now);
        self.state = SessionState::Running;
        log::info!("test session started at t={now:.3}");
    }

    /// Release, then stop the disturbance, then mark idle. No-op while idle.
    pub fn stop<S: KinematicsSolver>(&mut self, chain: &mut KinematicChain<S>) {
        if !self.is_running() {
            return;
        }
        self.stabilizer.release();
        self.disturbance.stop(chain);
        self.state = SessionState::Idle;
        log::info!("test session stopped");
    }

    /// Disturbance update, then stabilization tick.
    pub fn tick<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        now: f64,
        dt: f64,
    ) -> Result<TickOutcome, ArmError> {
        self.disturbance.tick(chain, now);
        self.stabilizer.tick(chain, dt)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::control::smoothing::Smoothing;
    use crate::kinematics::PlanarTwoLinkSolver;

    fn chain() -> KinematicChain<PlanarTwoLinkSolver> {
        let solver = PlanarTwoLinkSolver::new(2.0, 1.5).unwrap();
        let mut chain = KinematicChain::create(solver, DVec3::ZERO).unwrap();
        chain.set_angles(&[0.4, 1.0]).unwrap();
        chain
    }

    fn planar_session(lerp_speed: f64) -> TestSession {
        TestSession::new(
            StabilizationController::new(Smoothing::with_speed(lerp_speed)),
            // Keep the shake in the arm's plane, 1 Hz on both axes
            DisturbanceGenerator::new(
                DVec3::new(0.2, 0.15, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ),
        )
    }

    #[test]
    fn start_anchors_before_disturbing() {
        let mut chain = chain();
        let effector = chain.effector();
        let mut session = planar_session(5.0);
        session.start(&mut chain, 0.0);

        assert!(session.is_running());
        assert!(session.stabilizer().is_anchored());
        assert!(session.disturbance().is_playing());
        assert_eq!(session.stabilizer().anchor().unwrap().point, effector);

        let _ = session.tick(&mut chain, 0.1, 0.1).unwrap();
        assert_eq!(session.stabilizer().anchor().unwrap().point, effector);
    }

    #[test]
    fn start_anchors_against_a_still_mount() {
        let mut chain = chain();
        let base = chain.base_frame();
        let effector = chain.effector();
        let mut session = planar_session(5.0);

        session.disturbance_mut().play(&chain, 0.0);
        let _ = session.tick(&mut chain, 0.2, 0.2).unwrap();
        assert_ne!(chain.base_frame(), base);

        session.start(&mut chain, 0.2);
        let anchor = session.stabilizer().anchor().unwrap().point;
        assert!(anchor.distance(effector) < 1e-12);
        assert_eq!(session.disturbance().origin(), Some(DVec3::ZERO));
        assert!(session.disturbance().is_playing());
    }

    #[test]
    fn start_then_stop_restores_everything() {
        let mut chain = chain();
        let base = chain.base_frame();
        let mut session = planar_session(5.0);
        session.start(&mut chain, 0.0);
        session.stop(&mut chain);

        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.stabilizer().is_anchored());
        assert!(!session.disturbance().is_playing());
        assert_eq!(chain.base_frame(), base);
    }

    #[test]
    fn stop_mid_shake_restores_base_exactly() {
        let mut chain = chain();
        let base = chain.base_frame();
        let mut session = planar_session(5.0);
        session.start(&mut chain, 0.0);
        for i in 1..=37 {
            let now = f64::from(i) * 0.0167;
            let _ = session.tick(&mut chain, now, 0.0167).unwrap();
        }
        session.stop(&mut chain);
        assert_eq!(chain.base_frame(), base);
    }

    #[test]
    fn triggers_are_idempotent() {
        let mut chain = chain();
        let mut session = planar_session(5.0);
        session.stop(&mut chain);
        assert_eq!(session.state(), SessionState::Idle);

        session.start(&mut chain, 0.0);
        let anchor = session.stabilizer().anchor().unwrap().point;
        let _ = session.tick(&mut chain, 0.3, 0.3).unwrap();
        session.start(&mut chain, 0.3);
        assert_eq!(session.stabilizer().anchor().unwrap().point, anchor);
        assert_eq!(session.disturbance().origin(), Some(DVec3::ZERO));
    }

    #[test]
    fn effector_tracks_anchor_under_shake() {
        let mut chain = chain();
        let mut session = planar_session(60.0);
        session.start(&mut chain, 0.0);
        let anchor = session.stabilizer().anchor().unwrap().point;

        let dt = 1.0 / 120.0;
        let mut worst: f64 = 0.0;
        for i in 1..=240 {
            let outcome =
                session.tick(&mut chain, f64::from(i) * dt, dt).unwrap();
            assert_eq!(outcome, TickOutcome::Corrected);
            if i > 30 {
                worst = worst.max(chain.effector().distance(anchor));
            }
        }
        // The shake alone would move the effector by up to 0.25
        assert!(worst < 0.1, "worst drift {worst}");
    }

    #[test]
    fn converges_to_anchored_pose_when_base_returns() {
        let mut chain = chain();
        let baseline = chain.angles().to_vec();
        let mut session = planar_session(5.0);
        session.start(&mut chain, 0.0);

        // Shake for a while, off the zero crossings
        let dt = 0.01;
        for i in 1..=73 {
            let _ = session.tick(&mut chain, f64::from(i) * dt, dt).unwrap();
        }
        assert!(chain.angles()[0] != baseline[0]);

        // Whole periods: every sine term is zero again
        for k in 1..=200 {
            let _ = session.tick(&mut chain, f64::from(k), dt).unwrap();
            assert!(
                (chain.base_frame().offset).length() < 1e-9,
                "base should sit on origin"
            );
        }
        for (a, b) in chain.angles().iter().zip(&baseline) {
            assert!((a - b).abs() < 1e-3, "{a} vs {b}");
        }
        let anchor = session.stabilizer().anchor().unwrap();
        assert_eq!(anchor.baseline, baseline);
    }
}
