//! Camera system: look-at camera, orthographic projection, scripted paths
//! and the GPU uniform they feed.

/// Fixed-rate driver that advances a path from frame deltas.
pub mod animator;
/// GPU camera uniform buffer and bind group.
pub mod controller;
/// Core camera, projection and GPU uniform types.
pub mod core;
pub mod path;
