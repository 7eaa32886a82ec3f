//! Sinusoidal shake of the chain's mount.
//!
//! Per axis: `offset = amplitude * sin(2π * frequency * (t - t0))`, added to
//! the mount position captured at [`play`](DisturbanceGenerator::play). Axes
//! are independent. Given the origin and start time the offset is a pure
//! function of the clock, so replaying the same times reproduces the same
//! offsets.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::kinematics::{KinematicChain, KinematicsSolver};
use crate::options::DisturbanceOptions;

/// Playback state of the disturbance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisturbanceState {
    /// Mount sits at its origin.
    #[default]
    Stopped,
    /// Mount follows the sine offsets.
    Playing,
}

/// Time-varying offset generator for the chain's base frame.
#[derive(Debug, Clone)]
pub struct DisturbanceGenerator {
    amplitude: DVec3,
    frequency: DVec3,
    state: DisturbanceState,
    origin: DVec3,
    start_time: f64,
}

impl DisturbanceGenerator {
    /// Generator with per-axis amplitude (m) and frequency (Hz).
    #[must_use]
    pub fn new(amplitude: DVec3, frequency: DVec3) -> Self {
        Self {
            amplitude,
            frequency,
            state: DisturbanceState::Stopped,
            origin: DVec3::ZERO,
            start_time: 0.0,
        }
    }

    /// Generator configured from options.
    #[must_use]
    pub fn from_options(options: &DisturbanceOptions) -> Self {
        Self::new(options.amplitude(), options.frequency())
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> DisturbanceState {
        self.state
    }

    /// Whether the mount is being shaken.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == DisturbanceState::Playing
    }

    /// Mount position captured at play time, while playing.
    #[must_use]
    pub fn origin(&self) -> Option<DVec3> {
        self.is_playing().then_some(self.origin)
    }

    /// Peak offset per axis.
    #[must_use]
    pub fn amplitude(&self) -> DVec3 {
        self.amplitude
    }

    /// Frequency per axis.
    #[must_use]
    pub fn frequency(&self) -> DVec3 {
        self.frequency
    }

    /// Change the profile. Takes effect on the next tick.
    pub fn set_profile(&mut self, amplitude: DVec3, frequency: DVec3) {
        self.amplitude = amplitude;
        self.frequency = frequency;
    }

    /// Offset `elapsed` seconds after play.
    #[must_use]
    pub fn offset_at(&self, elapsed: f64) -> DVec3 {
        let phase = TAU * self.frequency * elapsed;
        DVec3::new(
            self.amplitude.x * phase.x.sin(),
            self.amplitude.y * phase.y.sin(),
            self.amplitude.z * phase.z.sin(),
        )
    }

    /// Capture the mount as origin and start shaking. No-op while playing.
    pub fn play<S: KinematicsSolver>(
        &mut self,
        chain: &KinematicChain<S>,
        now: f64,
    ) {
        if self.is_playing() {
            return;
        }
        self.origin = chain.base_frame().offset;
        self.start_time = now;
        self.state = DisturbanceState::Playing;
        log::info!(
            "disturbance playing from {:?} (amplitude {:?}, frequency {:?})",
            self.origin,
            self.amplitude,
            self.frequency
        );
    }

    /// Put the mount back on its origin exactly and stop. No-op while
    /// stopped.
    pub fn stop<S: KinematicsSolver>(&mut self, chain: &mut KinematicChain<S>) {
        if !self.is_playing() {
            return;
        }
        self.state = DisturbanceState::Stopped;
        chain.set_base_offset(self.origin);
        log::info!("disturbance stopped, mount restored to {:?}", self.origin);
    }

    /// Move the mount to `origin + offset(now - t0)`. No-op while stopped.
    pub fn tick<S: KinematicsSolver>(
        &mut self,
        chain: &mut KinematicChain<S>,
        now: f64,
    ) {
        if !self.is_playing() {
            return;
        }
        let offset = self.offset_at(now - self.start_time);
        chain.set_base_offset(self.origin + offset);
    }
}

impl Default for DisturbanceGenerator {
    fn default() -> Self {
        Self::from_options(&DisturbanceOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::PlanarTwoLinkSolver;

    fn chain_at(base: DVec3) -> KinematicChain<PlanarTwoLinkSolver> {
        let solver = PlanarTwoLinkSolver::new(2.0, 1.5).unwrap();
        KinematicChain::create(solver, base).unwrap()
    }

    fn shaker() -> DisturbanceGenerator {
        DisturbanceGenerator::new(
            DVec3::new(0.3, 0.2, 0.1),
            DVec3::new(0.5, 0.7, 0.4),
        )
    }

    #[test]
    fn offset_follows_sine_per_axis() {
        let gen = shaker();
        let t = 0.3;
        let off = gen.offset_at(t);
        assert!((off.x - 0.3 * (TAU * 0.5 * t).sin()).abs() < 1e-12);
        assert!((off.y - 0.2 * (TAU * 0.7 * t).sin()).abs() < 1e-12);
        assert!((off.z - 0.1 * (TAU * 0.4 * t).sin()).abs() < 1e-12);
        assert_eq!(gen.offset_at(0.0), DVec3::ZERO);
    }

    #[test]
    fn tick_is_inert_while_stopped() {
        let mut chain = chain_at(DVec3::new(1.0, 2.0, 3.0));
        let mut gen = shaker();
        gen.tick(&mut chain, 0.4);
        assert_eq!(chain.base_frame().offset, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn stop_restores_exact_origin_at_any_phase() {
        let origin = DVec3::new(0.7, -0.1, 0.0);
        for ticks in [1_u32, 7, 33, 250] {
            let mut chain = chain_at(origin);
            let mut gen = shaker();
            gen.play(&chain, 10.0);
            for i in 1..=ticks {
                gen.tick(&mut chain, 10.0 + f64::from(i) * 0.013);
            }
            assert_ne!(chain.base_frame().offset, origin);
            gen.stop(&mut chain);
            assert_eq!(chain.base_frame().offset, origin);
            assert_eq!(gen.state(), DisturbanceState::Stopped);
        }
    }

    #[test]
    fn replay_reproduces_offsets() {
        let times = [0.1, 0.25, 0.9, 1.7];
        let record = || {
            let mut chain = chain_at(DVec3::ZERO);
            let mut gen = shaker();
            gen.play(&chain, 0.0);
            times
                .iter()
                .map(|&t| {
                    gen.tick(&mut chain, t);
                    chain.base_frame().offset
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(record(), record());
    }

    #[test]
    fn play_twice_keeps_first_origin_and_start() {
        let mut chain = chain_at(DVec3::ZERO);
        let mut gen = shaker();
        gen.play(&chain, 0.0);
        gen.tick(&mut chain, 0.2);
        gen.play(&chain, 0.2);
        assert_eq!(gen.origin(), Some(DVec3::ZERO));
        gen.tick(&mut chain, 0.5);
        assert_eq!(chain.base_frame().offset, gen.offset_at(0.5));
    }

    #[test]
    fn stop_when_stopped_leaves_mount_alone() {
        let mut chain = chain_at(DVec3::ZERO);
        chain.set_base_offset(DVec3::X);
        let mut gen = shaker();
        gen.stop(&mut chain);
        assert_eq!(chain.base_frame().offset, DVec3::X);
        assert_eq!(gen.origin(), None);
    }
}
