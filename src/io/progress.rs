//! Acquisition and channel progress tracking with automatic batching for large runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for batch stitching
///
/// Shows one channel bar per acquisition folder for small runs, and only a single
/// batch bar once there are more folders than fit on screen. All handles are
/// thread-safe, so folders may report from worker threads.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    individual_bars: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FOLDER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>12} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Acquisitions: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            individual_bars: true,
        }
    }

    /// Prepare the display for `folder_count` acquisition folders
    pub fn initialize(&mut self, folder_count: usize) {
        let batch_bar = ProgressBar::new(folder_count as u64);
        batch_bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(batch_bar));

        // Avoid terminal spam for large runs
        self.individual_bars = folder_count <= MAX_INDIVIDUAL_PROGRESS_BARS;
    }

    /// Add a bar tracking the `channels` stitches of one folder
    pub fn start_folder(&self, name: &str, channels: usize) -> ProgressBar {
        if !self.individual_bars {
            return ProgressBar::hidden();
        }
        let bar = self.multi_progress.add(ProgressBar::new(channels as u64));
        bar.set_style(FOLDER_STYLE.clone());
        bar.set_prefix(name.to_string());
        bar
    }

    /// Record one finished channel on a folder bar
    pub fn complete_channel(bar: &ProgressBar, name: &str) {
        bar.inc(1);
        bar.set_message(format!("✓ {name}"));
    }

    /// Remove a folder bar and advance the batch bar
    pub fn complete_folder(&self, bar: &ProgressBar) {
        bar.finish_and_clear();
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All acquisitions processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Whether folders get their own bars
    pub const fn shows_individual_bars(&self) -> bool {
        self.individual_bars
    }
}
