//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the key-binding map and the last-known target
//! slider values. It is the only thing that sits between raw UI events and
//! the engine's [`execute`](crate::engine::ArmEngine::execute) method.

use glam::DVec3;

use super::event::InputEvent;
use crate::engine::command::ArmCommand;
use crate::options::KeybindingOptions;

/// Converts raw UI events into [`ArmCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
    /// Current target slider values; a single-axis event edits one of them.
    target: DVec3,
}

impl InputProcessor {
    /// Processor with the given bindings and initial target slider values.
    #[must_use]
    pub fn new(key_bindings: KeybindingOptions, target: DVec3) -> Self {
        Self {
            key_bindings,
            target,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Current target slider values.
    #[must_use]
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Move the target sliders to follow the engine's readout.
    pub fn sync_target(&mut self, target: DVec3) {
        self.target = target;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ArmCommand> {
        self.key_bindings.lookup(key).map(|action| action.to_command())
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ArmCommand> {
        match event {
            InputEvent::KeyPressed { key } => {
                let command = self.handle_key_press(&key);
                if command.is_none() {
                    log::trace!("unbound key {key}");
                }
                command
            }
            InputEvent::AngleSlider { joint, degrees } => {
                Some(ArmCommand::SetAngle { joint, degrees })
            }
            InputEvent::TargetSlider { axis, value } => {
                self.target[axis.index()] = value;
                Some(ArmCommand::SetTarget {
                    position: self.target,
                })
            }
            InputEvent::TargetMoved { position } => {
                self.target = position;
                Some(ArmCommand::SetTarget { position })
            }
            InputEvent::ResetClicked => Some(ArmCommand::Reset),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeybindingOptions::default(), DVec3::ZERO)
    }
}
