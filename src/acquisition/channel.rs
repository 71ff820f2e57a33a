//! Partitions an acquisition folder's files into channel groups by file-name token

use std::fmt;
use std::path::{Path, PathBuf};

/// Imaging channel a tile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelTag {
    /// Fluorescence channel 1
    Ch1,
    /// Fluorescence channel 2
    Ch2,
    /// Fluorescence channel 3
    Ch3,
    /// Fluorescence channel 4
    Ch4,
    /// Composite overlay of all channels
    Overlay,
}

impl ChannelTag {
    /// All channels in the order their tokens are checked
    pub const ALL: [Self; 5] = [Self::Ch1, Self::Ch2, Self::Ch3, Self::Ch4, Self::Overlay];

    /// Token the instrument writes into file names of this channel
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ch1 => "CH1",
            Self::Ch2 => "CH2",
            Self::Ch3 => "CH3",
            Self::Ch4 => "CH4",
            Self::Overlay => "Overlay",
        }
    }

    /// Channel whose token appears first in check order within `file_name`
    pub fn detect(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| file_name.contains(tag.token()))
    }
}

impl fmt::Display for ChannelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Files of one acquisition split by channel, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelGroups {
    ch1: Vec<PathBuf>,
    ch2: Vec<PathBuf>,
    ch3: Vec<PathBuf>,
    ch4: Vec<PathBuf>,
    overlay: Vec<PathBuf>,
    unmatched: Vec<PathBuf>,
}

impl ChannelGroups {
    /// Files classified as `tag`
    pub fn get(&self, tag: ChannelTag) -> &[PathBuf] {
        self.slot(tag)
    }

    /// Files whose names carry no channel token
    pub fn unmatched(&self) -> &[PathBuf] {
        &self.unmatched
    }

    /// Every channel with its files, in check order, including empty channels
    pub fn iter(&self) -> impl Iterator<Item = (ChannelTag, &[PathBuf])> {
        ChannelTag::ALL
            .into_iter()
            .map(move |tag| (tag, self.get(tag)))
    }

    /// Number of channels holding at least one file
    pub fn populated(&self) -> usize {
        self.iter().filter(|(_, files)| !files.is_empty()).count()
    }

    /// Reorder the files of every channel in place
    pub fn reorder(&mut self, mut order: impl FnMut(ChannelTag, &mut [PathBuf])) {
        for tag in ChannelTag::ALL {
            order(tag, self.slot_mut(tag));
        }
    }

    const fn slot(&self, tag: ChannelTag) -> &Vec<PathBuf> {
        match tag {
            ChannelTag::Ch1 => &self.ch1,
            ChannelTag::Ch2 => &self.ch2,
            ChannelTag::Ch3 => &self.ch3,
            ChannelTag::Ch4 => &self.ch4,
            ChannelTag::Overlay => &self.overlay,
        }
    }

    const fn slot_mut(&mut self, tag: ChannelTag) -> &mut Vec<PathBuf> {
        match tag {
            ChannelTag::Ch1 => &mut self.ch1,
            ChannelTag::Ch2 => &mut self.ch2,
            ChannelTag::Ch3 => &mut self.ch3,
            ChannelTag::Ch4 => &mut self.ch4,
            ChannelTag::Overlay => &mut self.overlay,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Split `files` into channel groups by the token in each file name
///
/// Only the file name is inspected, never the parent folders. Relative order is kept
/// within each group and files without a token end up in [`ChannelGroups::unmatched`].
pub fn classify<I>(files: I) -> ChannelGroups
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut groups = ChannelGroups::default();
    for file in files {
        match ChannelTag::detect(&file_name(&file)) {
            Some(tag) => groups.slot_mut(tag).push(file),
            None => groups.unmatched.push(file),
        }
    }
    groups
}
