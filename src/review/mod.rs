//! Good/bad review of tile and composite images, independent of any GUI

/// Review verdicts
pub mod mark;
/// Review sessions and export of marked images
pub mod session;

pub use mark::Mark;
pub use session::{ReviewItem, ReviewSession};
