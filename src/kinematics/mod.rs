//! Kinematic chain model and the solvers behind it.
//!
//! The control core only talks to [`KinematicChain`]; the chain talks to a
//! [`KinematicsSolver`]. Two solvers ship with the crate: the numeric
//! [`SerialArmSolver`] for configurable N-joint arms and the analytic
//! [`PlanarTwoLinkSolver`].

mod chain;
mod planar;
mod serial;
mod solver;

pub use chain::{BaseFrame, JointPositionBuffer, KinematicChain};
pub use planar::PlanarTwoLinkSolver;
pub use serial::SerialArmSolver;
pub use solver::{KinematicsSolver, SolveOutcome, SolveStatus};
