//! Crate-level error types.

use std::fmt;

/// Errors produced by the steadyarm crate.
///
/// An unreachable IK target is deliberately absent: it is an ordinary
/// [`SolveOutcome::Unreachable`](crate::kinematics::SolveOutcome) value.
#[derive(Debug)]
pub enum ArmError {
    /// The kinematics solver could not be created. Fatal: nothing that
    /// depends on the chain can run.
    Creation(String),
    /// An angle vector did not have exactly one entry per joint.
    AngleCount {
        /// Degree-of-freedom count of the chain.
        expected: usize,
        /// Length of the vector that was passed.
        actual: usize,
    },
    /// A joint index was outside the chain.
    JointIndex {
        /// Offending index.
        index: usize,
        /// Degree-of-freedom count of the chain.
        count: usize,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ArmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creation(msg) => {
                write!(f, "kinematics solver creation failed: {msg}")
            }
            Self::AngleCount { expected, actual } => write!(
                f,
                "angle vector has {actual} entries, chain has {expected} \
                 joints"
            ),
            Self::JointIndex { index, count } => {
                write!(f, "joint index {index} out of range (0..{count})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ArmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArmError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
