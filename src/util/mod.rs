//! Shared utilities for the control loop.

pub mod frame_timing;
