//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod stages;

pub(crate) use render::RenderArgs;
