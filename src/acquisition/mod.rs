//! Acquisition folder processing
//!
//! This module contains:
//! - Channel classification of an acquisition's tiles
//! - Recovery of scan order from tile file names
//! - Batch orchestration across acquisition folders

/// Channel tags and file classification
pub mod channel;
/// Folder discovery and batch stitching
pub mod orchestrator;
/// Tile ordering policies
pub mod ordering;

pub use channel::{ChannelGroups, ChannelTag, classify};
pub use orchestrator::{AcquisitionProcessor, RunConfig, run};
pub use ordering::TileOrder;
