use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tuning for the numeric inverse-kinematics solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Solver", inline)]
#[serde(default)]
pub struct SolverOptions {
    /// Effector-to-target distance that counts as reached (meters).
    #[schemars(title = "Tolerance", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub tolerance: f64,
    /// Gradient-descent step size.
    #[schemars(title = "Learning Rate", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub learning_rate: f64,
    /// Iteration budget per solve.
    #[schemars(title = "Iterations", range(min = 10, max = 1000), extend("step" = 10))]
    pub max_iterations: u32,
    /// Finite-difference step for the numeric gradient (radians).
    #[schemars(skip)]
    pub gradient_step: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            learning_rate: 0.01,
            max_iterations: 100,
            gradient_step: 0.001,
        }
    }
}
