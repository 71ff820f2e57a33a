//! Recovers acquisition scan order from tile file names

use crate::acquisition::channel::ChannelTag;
use std::path::{Path, PathBuf};

/// How the tiles of one channel are ordered before stitching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TileOrder {
    /// Case-insensitive file name order, as listed by the acquisition workstation
    Name,
    /// Numeric order of the index embedded in each file name
    #[default]
    #[value(name = "index")]
    EmbeddedIndex,
}

// Lower-cased name first so that ordering ignores case, raw name breaks ties
fn name_key(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    (name.to_lowercase(), name)
}

/// Sort `files` by file name, ignoring case
pub fn sort_by_name(files: &mut [PathBuf]) {
    files.sort_by_cached_key(|path| name_key(path));
}

/// Tile index embedded in a file name
///
/// The channel token is removed first so that `CH1` does not read as index 1; the last
/// run of ASCII digits in the remaining stem is the index.
///
/// ```
/// use std::path::Path;
/// use tilestitch::acquisition::channel::ChannelTag;
/// use tilestitch::acquisition::ordering::embedded_index;
///
/// let path = Path::new("Image_XY01_00012_CH2.tif");
/// assert_eq!(embedded_index(path, ChannelTag::Ch2), Some(12));
/// ```
pub fn embedded_index(path: &Path, tag: ChannelTag) -> Option<u64> {
    let stem = path.file_stem()?.to_string_lossy();
    let stripped = stem.replace(tag.token(), "_");
    stripped
        .rsplit(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())?
        .parse()
        .ok()
}

/// Put one channel's `files` into the requested order
///
/// Files without an embedded index sort after indexed ones, by name. The sort is stable.
pub fn apply(order: TileOrder, tag: ChannelTag, files: &mut [PathBuf]) {
    match order {
        TileOrder::Name => sort_by_name(files),
        TileOrder::EmbeddedIndex => files.sort_by_cached_key(|path| {
            let index = embedded_index(path, tag);
            (index.is_none(), index.unwrap_or(0), name_key(path))
        }),
    }
}
