//! The stabilization loop: smoothing, mount disturbance, the anchor
//! controller, and the session that drives them together.

pub mod disturbance;
pub mod session;
pub mod smoothing;
pub mod stabilizer;

pub use disturbance::{DisturbanceGenerator, DisturbanceState};
pub use session::{SessionState, TestSession};
pub use smoothing::Smoothing;
pub use stabilizer::{Anchor, StabilizationController, TickOutcome};
