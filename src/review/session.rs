//! Review session: import images, record verdicts and export marked images

use crate::acquisition::ordering::sort_by_name;
use crate::io::configuration::{
    REVIEW_EXPORT_EXTENSION, REVIEW_IMAGE_EXTENSIONS, THUMBNAIL_MAX_EDGE,
};
use crate::io::error::{Result, StitchError, file_system, invalid_parameter};
use crate::io::image::{PixelFormat, load_image, save_image};
use crate::io::status::{StatusKind, StatusMessage};
use crate::review::mark::Mark;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One image under review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    path: PathBuf,
    mark: Mark,
}

impl ReviewItem {
    /// Unmarked item for the image at `path`
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            mark: Mark::Unmarked,
        }
    }

    /// Source image
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current verdict
    pub const fn mark(&self) -> Mark {
        self.mark
    }

    /// Decode the image scaled to fit the thumbnail box, keeping its aspect ratio
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::ImageLoad`] if the image cannot be decoded
    pub fn thumbnail(&self) -> Result<DynamicImage> {
        Ok(load_image(&self.path)?.thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE))
    }

    /// Where this item is exported for its current mark, `None` when unmarked
    pub fn export_path(&self, dest_dir: &Path) -> Option<PathBuf> {
        let suffix = self.mark.export_suffix()?;
        let name = self.path.file_name()?.to_string_lossy();
        // Everything after the first dot is dropped, so `a.ome.tif` exports as `a_good.tif`
        let base = name.split('.').next().unwrap_or_default();
        Some(dest_dir.join(format!("{base}{suffix}.{REVIEW_EXPORT_EXTENSION}")))
    }
}

/// Images under review, in import order
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    items: Vec<ReviewItem>,
}

/// Image files below `root`, each folder's files before its subfolders
///
/// Matches the review extensions ignoring case. Within each folder, files and subfolders
/// are sorted by name ignoring case.
///
/// # Errors
///
/// Returns [`StitchError::FileSystem`] if a folder cannot be listed
pub fn collect_image_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut subfolders = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|e| file_system(root, "list images", e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| file_system(root, "list images", e))?
            .path();
        if path.is_dir() {
            subfolders.push(path);
        } else if is_review_image(&path) {
            files.push(path);
        }
    }

    sort_by_name(&mut files);
    sort_by_name(&mut subfolders);
    for folder in subfolders {
        files.extend(collect_image_files(&folder)?);
    }
    Ok(files)
}

fn is_review_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            REVIEW_IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl ReviewSession {
    /// Create an empty session
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add every decodable image below `root` as unmarked
    ///
    /// Images that fail to decode are skipped. Returns the number of images added.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::FileSystem`] if a folder cannot be listed
    pub fn import_folder(&mut self, root: &Path) -> Result<usize> {
        let before = self.items.len();
        for path in collect_image_files(root)? {
            match load_image(&path) {
                Ok(_) => self.items.push(ReviewItem::new(path)),
                Err(err) => warn!("{err}"),
            }
        }
        let added = self.items.len() - before;
        debug!(root = %root.display(), added, "imported review images");
        Ok(added)
    }

    /// Add one image without checking it
    pub fn push(&mut self, path: PathBuf) {
        self.items.push(ReviewItem::new(path));
    }

    /// All items in import order
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Number of items
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the session holds no items
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the verdict of item `index`, returning the new verdict
    pub fn toggle(&mut self, index: usize) -> Option<Mark> {
        let item = self.items.get_mut(index)?;
        item.mark = item.mark.toggled();
        Some(item.mark)
    }

    /// Set the verdict of item `index`, returning the previous verdict
    pub fn set_mark(&mut self, index: usize, mark: Mark) -> Option<Mark> {
        let item = self.items.get_mut(index)?;
        Some(std::mem::replace(&mut item.mark, mark))
    }

    /// Drop item `index` from the session
    pub fn remove(&mut self, index: usize) -> Option<ReviewItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Items carrying `mark`
    pub fn marked(&self, mark: Mark) -> impl Iterator<Item = &ReviewItem> {
        self.items.iter().filter(move |item| item.mark == mark)
    }

    /// Items to display given the good and bad filters, with their indices
    ///
    /// Unmarked items are always shown.
    pub fn visible(
        &self,
        show_good: bool,
        show_bad: bool,
    ) -> impl Iterator<Item = (usize, &ReviewItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| match item.mark {
                Mark::Unmarked => true,
                Mark::Good => show_good,
                Mark::Bad => show_bad,
            })
    }

    /// Write every item marked `mark` into `dest_dir` as TIFF
    ///
    /// Items are exported at full resolution as `<name>_good.tif` or `<name>_bad.tif`.
    /// A failed item is reported and the export continues with the next one.
    pub fn export(&self, mark: Mark, dest_dir: &Path) -> Vec<StatusMessage> {
        if mark == Mark::Unmarked {
            let err = invalid_parameter(
                "mark",
                &mark,
                &"only images marked good or bad can be exported",
            );
            return vec![StatusMessage::from(&err)];
        }
        if dest_dir.as_os_str().is_empty() {
            let err = StitchError::NoSelection {
                what: "to save the images to",
            };
            return vec![StatusMessage::from(&err)];
        }

        let mut messages = Vec::new();
        for item in self.marked(mark) {
            let Some(target) = item.export_path(dest_dir) else {
                continue;
            };
            let message = match export_image(item.path(), &target) {
                Ok(()) => {
                    StatusMessage::new(StatusKind::Saved, format!("Saved {}", target.display()))
                }
                Err(err) => {
                    warn!("{err}");
                    StatusMessage::new(
                        StatusMessage::from(&err).kind,
                        format!("Failed to save image: {} ({err})", target.display()),
                    )
                }
            };
            messages.push(message);
        }
        messages.push(StatusMessage::complete(format!("{mark} images saved.")));
        messages
    }
}

fn export_image(source: &Path, target: &Path) -> Result<()> {
    let image = load_image(source)?;
    let image = PixelFormat::of(image.color()).normalize(image);
    save_image(&image, target, ImageFormat::Tiff)
}
