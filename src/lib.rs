//! Renders biome border lines around an observer, calculated in the background from a sectioned voxel world.
//!
//! The heavy lifting lives in [`biome_border_map`]. This crate enumerates the visible sections each frame, draws whatever
//! borders are ready through a [`LineSink`], and keeps the border cache in step with the world's load and unload events.

mod config;
mod renderer;
mod viewer;

pub use config::{
    BorderColors, Config, Rgba, MAX_RENDER_DISTANCE, MAX_VERTICAL_RENDER_DISTANCE,
};
pub use renderer::*;
pub use viewer::{BorderViewer, FrameReport};

pub use biome_border_map;
