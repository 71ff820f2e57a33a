//! Grid stitching engine
//!
//! This module contains:
//! - Grid derivation, scan-order remapping and placement geometry
//! - Tile loading, compositing and composite export

/// Loading, compositing and writing one channel's composite
pub mod compositor;
/// Grid specification, geometry modes and tile placement
pub mod grid;

pub use compositor::{StitchOutcome, compose, stitch};
pub use grid::{Geometry, GridSpec, Layout, TilePlacement};
