//! Stitching constants and runtime configuration defaults

// Overlap geometry of the acquisition instrument
/// Horizontal overlap between neighbouring tiles in pixels
pub const TILE_OVERLAP_X: u32 = 289;
/// Vertical overlap between neighbouring tiles in pixels
pub const TILE_OVERLAP_Y: u32 = 216;

/// Side length the legacy geometry always lays out, whatever the tile count
pub const LEGACY_GRID_SIDE: usize = 3;
/// Canvas width reduction of the legacy geometry (two overlaps)
pub const LEGACY_CANVAS_TRIM_X: u32 = 2 * TILE_OVERLAP_X;
/// Canvas height reduction of the legacy geometry (two overlaps)
pub const LEGACY_CANVAS_TRIM_Y: u32 = 2 * TILE_OVERLAP_Y;

/// Grid side lengths that can be stitched
pub const SUPPORTED_GRID_SIDES: [usize; 3] = [3, 4, 5];

// Acquisition folder conventions
/// Token identifying an acquisition subfolder
pub const ACQUISITION_FOLDER_TOKEN: &str = "XY";
/// Replacement for the first two characters of a folder name in output names
pub const OUTPUT_PREFIX_REPLACEMENT: &str = "A";
/// Extension of raw acquisition tiles
pub const ACQUISITION_TILE_EXTENSION: &str = "tif";

// Output settings
/// Extension of stitched composites
pub const STITCHED_OUTPUT_EXTENSION: &str = "png";

// Review settings
/// Extensions picked up when importing images for review
pub const REVIEW_IMAGE_EXTENSIONS: [&str; 2] = ["tif", "png"];
/// Longest edge of review thumbnails in pixels
pub const THUMBNAIL_MAX_EDGE: u32 = 220;
/// Suffix added to exported images marked good
pub const GOOD_EXPORT_SUFFIX: &str = "_good";
/// Suffix added to exported images marked bad
pub const BAD_EXPORT_SUFFIX: &str = "_bad";
/// Extension of exported review images
pub const REVIEW_EXPORT_EXTENSION: &str = "tif";

// Progress bar display settings
/// Maximum number of per-folder bars shown at once
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
