//! Error types for stitching, acquisition processing and review export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all stitching operations
#[derive(Debug)]
pub enum StitchError {
    /// The caller supplied no folder to work on
    NoSelection {
        /// What was expected to be selected
        what: &'static str,
    },

    /// A channel group does not hold 9, 16 or 25 tiles
    WrongTileCount {
        /// Output base name of the channel
        name: String,
        /// Number of tiles found
        count: usize,
    },

    /// Failed to decode a tile or review image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A tile does not share the dimensions of the first tile of its grid
    DimensionMismatch {
        /// Offending tile
        path: PathBuf,
        /// Dimensions of the first placed tile (width, height)
        expected: (u32, u32),
        /// Dimensions of the offending tile (width, height)
        found: (u32, u32),
    },

    /// Tiles are not larger than the fixed overlap
    ///
    /// Placement steps are `width - 289` and `height - 216`, so both must be positive.
    TileTooSmall {
        /// Tile width in pixels
        width: u32,
        /// Tile height in pixels
        height: u32,
    },

    /// Failed to encode or write an output image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for StitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection { what } => {
                write!(f, "No folder selected. Please choose a folder {what}.")
            }
            Self::WrongTileCount { name, count } => {
                write!(
                    f,
                    "Wrong number of images for {name} ({count} found). \
                     Please ensure there are exactly 9, 16, or 25 images to complete a stitch."
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::DimensionMismatch {
                path,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Tile '{}' is {}x{} but the grid expects {}x{}",
                    path.display(),
                    found.0,
                    found.1,
                    expected.0,
                    expected.1
                )
            }
            Self::TileTooSmall { width, height } => {
                write!(
                    f,
                    "Tiles of {width}x{height} are too small for the fixed overlap \
                     (must exceed {}x{})",
                    crate::io::configuration::TILE_OVERLAP_X,
                    crate::io::configuration::TILE_OVERLAP_Y
                )
            }
            Self::ImageExport { path, source } => {
                write!(f, "Failed to save image to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for StitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for stitching results
pub type Result<T> = std::result::Result<T, StitchError>;

impl From<image::ImageError> for StitchError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for StitchError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StitchError {
    StitchError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for `operation` on `path`
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> StitchError {
    StitchError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
