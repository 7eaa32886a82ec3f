use serde::{Deserialize, Serialize};

use crate::engine::command::ArmCommand;

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// start_session = "KeyB"
/// reset = "Backspace"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Anchor the effector and start the disturbance.
    StartSession,
    /// Release the anchor and stop the disturbance.
    StopSession,
    /// Anchor at the current effector position.
    AnchorNow,
    /// Drop the anchor.
    Release,
    /// Start shaking the mount.
    Play,
    /// Stop shaking the mount.
    Stop,
    /// Zero the joints and restore the default target.
    Reset,
}

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> ArmCommand {
        match self {
            Self::StartSession => ArmCommand::StartSession,
            Self::StopSession => ArmCommand::StopSession,
            Self::AnchorNow => ArmCommand::AnchorNow,
            Self::Release => ArmCommand::Release,
            Self::Play => ArmCommand::Play,
            Self::Stop => ArmCommand::Stop,
            Self::Reset => ArmCommand::Reset,
        }
    }
}
