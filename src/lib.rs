// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Closed-loop end-effector stabilization for a simulated articulated arm.
//!
//! An anchor point is captured from the arm's end effector, the arm's mount
//! is shaken by a sinusoidal disturbance, and every tick the joint angles
//! are re-solved toward the anchor and blended in with exponential
//! smoothing so the effector stays put while the base moves.
//!
//! # Key entry points
//!
//! - [`engine::ArmEngine`] - owns the arm and runs the tick loop
//! - [`kinematics::KinematicChain`] - joint angles, base frame and the
//!   injected [`kinematics::KinematicsSolver`]
//! - [`control::TestSession`] - start/stop of a disturbance test
//! - [`interactive::InteractiveParameterController`] - throttled manual
//!   sliders
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! The engine is the single writer of the chain. Within a tick the
//! disturbance moves the mount, the stabilizer corrects the pose, deferred
//! slider values are applied, and an [`engine::ArmSnapshot`] is produced
//! for whatever draws the arm. No locking is involved: every component
//! borrows the chain for the duration of one call.

pub mod control;
pub mod engine;
pub mod error;
pub mod input;
pub mod interactive;
pub mod kinematics;
pub mod options;
pub mod util;
