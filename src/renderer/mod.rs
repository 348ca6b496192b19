//! Rendering: the instanced solid-mesh pass and shared pipeline state.

pub(crate) mod pipeline_util;
pub mod solid;
