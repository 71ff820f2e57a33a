//! Human-readable status messages reported by every stitching and review operation

use crate::io::error::StitchError;
use std::fmt;
use std::path::Path;

/// Category of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Nothing was selected to work on
    NoSelection,
    /// A channel group had an unsupported number of tiles
    WrongTileCount,
    /// A source image could not be read or decoded
    LoadFailure,
    /// Tiles of one grid disagree on their dimensions or are too small
    DimensionMismatch,
    /// An output could not be written
    WriteFailure,
    /// Caller misuse, such as exporting unmarked images
    InvalidRequest,
    /// One channel was stitched and saved
    Stitched,
    /// Every channel of one acquisition folder was processed
    FolderComplete,
    /// One review image was exported
    Saved,
    /// The whole operation finished
    Complete,
}

impl StatusKind {
    /// Whether the message reports a failure
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::NoSelection
                | Self::WrongTileCount
                | Self::LoadFailure
                | Self::DimensionMismatch
                | Self::WriteFailure
                | Self::InvalidRequest
        )
    }
}

/// One discrete message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Category of the message
    pub kind: StatusKind,
    /// Text to display
    pub text: String,
}

impl StatusMessage {
    /// Create a message of the given kind
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Report a channel stitched to `output`
    pub fn stitched(name: &str, output: &Path) -> Self {
        Self::new(
            StatusKind::Stitched,
            format!("Stitched {name} saved to {}", output.display()),
        )
    }

    /// Report an acquisition folder whose channels were all processed
    pub fn folder_complete(prefix: &str, dest_dir: &Path) -> Self {
        Self::new(
            StatusKind::FolderComplete,
            format!(
                "Stitched images for {prefix} saved to {}",
                dest_dir.display()
            ),
        )
    }

    /// Report the end of a batch
    pub fn complete(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Complete, text)
    }

    /// Whether the message reports a failure
    pub const fn is_failure(&self) -> bool {
        self.kind.is_failure()
    }
}

impl From<&StitchError> for StatusMessage {
    fn from(err: &StitchError) -> Self {
        let kind = match err {
            StitchError::NoSelection { .. } => StatusKind::NoSelection,
            StitchError::WrongTileCount { .. } => StatusKind::WrongTileCount,
            StitchError::ImageLoad { .. } => StatusKind::LoadFailure,
            StitchError::DimensionMismatch { .. } | StitchError::TileTooSmall { .. } => {
                StatusKind::DimensionMismatch
            }
            StitchError::ImageExport { .. } | StitchError::FileSystem { .. } => {
                StatusKind::WriteFailure
            }
            StitchError::InvalidParameter { .. } => StatusKind::InvalidRequest,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<StitchError> for StatusMessage {
    fn from(err: StitchError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
