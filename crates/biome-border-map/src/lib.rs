//! Biome border data for a sectioned voxel world.
//!
//! # Sections
//!
//! The world is partitioned into [`SectionKey`]-addressed cubes of 16³ voxels. Sections stack into columns between the bottom
//! and top of the world, given by a [`SectionRange`]. The host application loads and unloads sections as the player moves and
//! generates them in stages ([`GenerationStatus`]).
//!
//! # Borders
//!
//! A section's [`SectionBorderData`] is a set of line segments lying on its six faces, marking where the biome changes (or
//! stays the same) across the face. The biome data is provided by the host through a [`BiomeSource`].
//!
//! Border calculation needs the biomes on both sides of every face, so a section is only calculated once it and each of its
//! neighbors are loaded and fully generated.
//!
//! # Caching
//!
//! [`BorderCache`] schedules calculations on a pool of worker threads and keeps the results for as long as their sections stay
//! loaded. It is designed to be driven from a single render thread, once per frame.

mod border_data;
mod cache;
mod calculator;
mod config;
mod coordinates;
mod neighbors;
mod section_key;
mod units;
mod world;

#[cfg(test)]
mod testkit;

pub use border_data::*;
pub use cache::*;
pub use calculator::*;
pub use config::*;
pub use coordinates::*;
pub use neighbors::*;
pub use section_key::*;
pub use units::*;
pub use world::*;

pub use biome_border_core as core;

pub use crate::core::glam;
