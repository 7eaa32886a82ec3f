use glam::DVec3;

use crate::options::Axis;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ArmCommand`](crate::engine::ArmCommand) values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(
///     InputEvent::AngleSlider { joint: 1, degrees: 45.0 },
/// ) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A physical key was pressed.
    KeyPressed {
        /// Key string in `winit::keyboard::KeyCode` debug format, e.g.
        /// `"KeyB"`.
        key: String,
    },
    /// A joint-angle slider moved.
    AngleSlider {
        /// Joint index.
        joint: usize,
        /// New slider value (degrees).
        degrees: f64,
    },
    /// One axis of the target slider moved.
    TargetSlider {
        /// Which coordinate changed.
        axis: Axis,
        /// New slider value.
        value: f64,
    },
    /// All three target sliders were set at once.
    TargetMoved {
        /// New target position.
        position: DVec3,
    },
    /// The reset button was clicked.
    ResetClicked,
}
