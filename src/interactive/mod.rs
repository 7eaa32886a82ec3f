//! Manual control surface over the chain.

/// Joint-angle and target sliders with readout labels.
pub mod panel;
/// Leading-edge rate gate.
pub mod throttle;

pub use panel::InteractiveParameterController;
pub use throttle::Throttle;
