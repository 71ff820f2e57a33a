//! Review verdict attached to each image

use crate::io::configuration::{BAD_EXPORT_SUFFIX, GOOD_EXPORT_SUFFIX};
use std::fmt;

/// Reviewer's verdict on one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// Not reviewed yet
    #[default]
    Unmarked,
    /// Accepted
    Good,
    /// Rejected
    Bad,
}

impl Mark {
    /// Verdict after a single click: good images become bad, everything else good
    pub const fn toggled(self) -> Self {
        match self {
            Self::Good => Self::Bad,
            Self::Unmarked | Self::Bad => Self::Good,
        }
    }

    /// File name suffix of exported images, `None` for unmarked images
    pub const fn export_suffix(self) -> Option<&'static str> {
        match self {
            Self::Unmarked => None,
            Self::Good => Some(GOOD_EXPORT_SUFFIX),
            Self::Bad => Some(BAD_EXPORT_SUFFIX),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unmarked => "Unmarked",
            Self::Good => "Good",
            Self::Bad => "Bad",
        })
    }
}
