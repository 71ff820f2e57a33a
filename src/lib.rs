//! Overlap-aware stitching of microscopy tile grids
//!
//! Acquisition folders hold one 3x3, 4x4 or 5x5 grid of overlapping tiles per imaging
//! channel. The crate classifies tiles by channel, restores their scan order, places them
//! with the instrument's fixed overlap and writes one composite per channel.

#![forbid(unsafe_code)]

/// Channel classification, tile ordering and batch processing of acquisition folders
pub mod acquisition;
/// Input/output operations, configuration and error handling
pub mod io;
/// Good/bad review of images
pub mod review;
/// Grid geometry and compositing
pub mod stitch;

pub use io::error::{Result, StitchError};
pub use io::status::{StatusKind, StatusMessage};
