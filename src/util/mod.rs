//! Shared utilities: the modelview matrix stack and frame timing.

/// Frame delta measurement and smoothed FPS.
pub mod frame_timing;
pub mod matrix_stack;
