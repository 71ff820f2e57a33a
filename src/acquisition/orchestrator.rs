//! Batch processing of acquisition folders: classify, order and stitch every channel

use crate::acquisition::channel::classify;
use crate::acquisition::ordering::{TileOrder, apply, sort_by_name};
use crate::io::configuration::{
    ACQUISITION_FOLDER_TOKEN, ACQUISITION_TILE_EXTENSION, OUTPUT_PREFIX_REPLACEMENT,
};
use crate::io::error::{Result, StitchError, file_system};
use crate::io::progress::ProgressManager;
use crate::io::status::StatusMessage;
use crate::stitch::compositor::stitch;
use crate::stitch::grid::Geometry;
use indicatif::ProgressBar;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Text reported once every acquisition has been processed
pub const COMPLETION_MESSAGE: &str = "Stitching complete.";

/// Runtime options of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Canvas geometry used for every channel
    pub geometry: Geometry,
    /// Tile ordering applied to every channel group
    pub order: TileOrder,
    /// Process acquisition folders on the rayon thread pool
    pub parallel: bool,
}

/// Output name prefix of an acquisition folder
///
/// Returns `None` unless the folder name contains the acquisition token. The first two
/// characters of the name are replaced, so `XY01` becomes `A01`.
pub fn acquisition_prefix(folder: &Path) -> Option<String> {
    let name = folder.file_name()?.to_string_lossy();
    if !name.contains(ACQUISITION_FOLDER_TOKEN) {
        return None;
    }
    let rest: String = name.chars().skip(2).collect();
    Some(format!("{OUTPUT_PREFIX_REPLACEMENT}{rest}"))
}

/// Immediate subdirectories of `root`, sorted by name ignoring case
///
/// # Errors
///
/// Returns [`StitchError::FileSystem`] if `root` cannot be listed
pub fn discover_acquisitions(root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|e| file_system(root, "list folders", e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| file_system(root, "list folders", e))?
            .path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    sort_by_name(&mut folders);
    Ok(folders)
}

/// Raw tiles of one acquisition folder, sorted by name ignoring case
///
/// Only regular files with the acquisition extension are listed; subfolders are not
/// descended into.
///
/// # Errors
///
/// Returns [`StitchError::FileSystem`] if `folder` cannot be listed
pub fn list_tiles(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(folder).map_err(|e| file_system(folder, "list tiles", e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| file_system(folder, "list tiles", e))?
            .path();
        let is_tile = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ACQUISITION_TILE_EXTENSION));
        if is_tile && path.is_file() {
            files.push(path);
        }
    }
    sort_by_name(&mut files);
    Ok(files)
}

/// Stitches every channel of a set of acquisition folders
///
/// Each channel is an independent unit of work: a failure is reported as a status
/// message and the remaining channels and folders are still processed.
pub struct AcquisitionProcessor {
    config: RunConfig,
    progress_manager: Option<ProgressManager>,
}

impl AcquisitionProcessor {
    /// Create a processor without progress display
    pub const fn new(config: RunConfig) -> Self {
        Self {
            config,
            progress_manager: None,
        }
    }

    /// Report progress through `progress_manager`
    #[must_use]
    pub fn with_progress(mut self, progress_manager: ProgressManager) -> Self {
        self.progress_manager = Some(progress_manager);
        self
    }

    /// Options this processor runs with
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Stitch every acquisition folder in `folders` into `dest_dir`
    ///
    /// Folders whose name lacks the acquisition token are skipped. Messages come back in
    /// folder order whether or not folders run in parallel, followed by a completion
    /// message. An empty `folders` yields a single no-selection message.
    pub fn run(&mut self, folders: &[PathBuf], dest_dir: &Path) -> Vec<StatusMessage> {
        if folders.is_empty() {
            let err = StitchError::NoSelection {
                what: "containing the images you want stitched",
            };
            warn!("{err}");
            return vec![StatusMessage::from(&err)];
        }

        let acquisitions: Vec<(&Path, String)> = folders
            .iter()
            .filter_map(|folder| match acquisition_prefix(folder) {
                Some(prefix) => Some((folder.as_path(), prefix)),
                None => {
                    debug!(folder = %folder.display(), "skipping folder without acquisition token");
                    None
                }
            })
            .collect();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(acquisitions.len());
        }

        let this = &*self;
        let per_folder: Vec<Vec<StatusMessage>> = if self.config.parallel {
            acquisitions
                .par_iter()
                .map(|(folder, prefix)| this.process_folder(folder, prefix, dest_dir))
                .collect()
        } else {
            acquisitions
                .iter()
                .map(|(folder, prefix)| this.process_folder(folder, prefix, dest_dir))
                .collect()
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        let mut messages: Vec<StatusMessage> = per_folder.into_iter().flatten().collect();
        info!(
            folders = acquisitions.len(),
            failures = messages.iter().filter(|m| m.is_failure()).count(),
            "batch finished"
        );
        messages.push(StatusMessage::complete(COMPLETION_MESSAGE));
        messages
    }

    fn process_folder(&self, folder: &Path, prefix: &str, dest_dir: &Path) -> Vec<StatusMessage> {
        let files = match list_tiles(folder) {
            Ok(files) => files,
            Err(err) => {
                warn!("{err}");
                return vec![StatusMessage::from(&err)];
            }
        };

        let mut groups = classify(files);
        if !groups.unmatched().is_empty() {
            debug!(
                folder = %folder.display(),
                dropped = groups.unmatched().len(),
                "ignoring files without a channel token"
            );
        }
        let order = self.config.order;
        groups.reorder(|tag, files| apply(order, tag, files));

        let bar = self
            .progress_manager
            .as_ref()
            .map(|pm| pm.start_folder(prefix, groups.populated()));

        let mut messages = Vec::new();
        for (tag, tiles) in groups.iter() {
            if tiles.is_empty() {
                info!(folder = %folder.display(), channel = %tag, "no tiles for channel");
                continue;
            }
            let name = format!("{prefix}_{tag}");
            let message = match stitch(tiles, dest_dir, &name, self.config.geometry) {
                Ok(outcome) => StatusMessage::stitched(&name, &outcome.output),
                Err(err) => {
                    warn!("{err}");
                    StatusMessage::from(&err)
                }
            };
            messages.push(message);
            if let Some(ref bar) = bar {
                ProgressManager::complete_channel(bar, &name);
            }
        }

        self.finish_folder(bar.as_ref());
        messages.push(StatusMessage::folder_complete(prefix, dest_dir));
        messages
    }

    fn finish_folder(&self, bar: Option<&ProgressBar>) {
        if let (Some(pm), Some(bar)) = (&self.progress_manager, bar) {
            pm.complete_folder(bar);
        }
    }
}

/// Stitch `folders` into `dest_dir` without progress display
pub fn run(folders: &[PathBuf], dest_dir: &Path, config: RunConfig) -> Vec<StatusMessage> {
    AcquisitionProcessor::new(config).run(folders, dest_dir)
}
