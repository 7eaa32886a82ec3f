//! Centralized arm/controller options with TOML preset support.
//!
//! All tweakable settings (arm geometry, solver tuning, smoothing, the
//! disturbance profile, panel slider ranges, keybindings) are consolidated
//! here. Options serialize to/from TOML so test rigs can be stored as
//! presets.

mod arm;
mod disturbance;
mod keybindings;
mod panel;
mod solver;
mod stabilizer;

use std::path::Path;

pub use arm::{ArmOptions, Axis, JointOptions};
pub use disturbance::DisturbanceOptions;
pub use keybindings::KeybindingOptions;
pub use panel::PanelOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use solver::SolverOptions;
pub use stabilizer::StabilizerOptions;

use crate::error::ArmError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[stabilizer]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Arm geometry and joint limits.
    pub arm: ArmOptions,
    /// Numeric IK tuning.
    pub solver: SolverOptions,
    /// Stabilization smoothing.
    pub stabilizer: StabilizerOptions,
    /// Mount disturbance profile.
    pub disturbance: DisturbanceOptions,
    /// Manual control surface.
    pub panel: PanelOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ArmError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| ArmError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ArmError> {
        let content = std::fs::read_to_string(path).map_err(ArmError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ArmError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ArmError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ArmError::Io)?;
        }
        std::fs::write(path, content).map_err(ArmError::Io)
    }
}
