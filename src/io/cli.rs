//! Command-line interface for batch and single-grid stitching

use crate::acquisition::orchestrator::{AcquisitionProcessor, RunConfig, discover_acquisitions};
use crate::acquisition::ordering::TileOrder;
use crate::io::error::{Result, StitchError};
use crate::io::progress::ProgressManager;
use crate::io::status::StatusMessage;
use crate::stitch::compositor::stitch;
use crate::stitch::grid::Geometry;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Stitch overlapping microscopy tile grids into one image per channel"
)]
/// Command-line arguments for the stitching tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Stitch every channel of every XY acquisition folder under SOURCE
    Batch(BatchArgs),
    /// Stitch one channel from an explicit list of tiles in scan order
    Grid(GridArgs),
}

/// Arguments of the `batch` operation
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing the XY acquisition subfolders
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Folder the stitched images are written to
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Canvas geometry for 4x4 and 5x5 grids
    #[arg(short, long, value_enum, default_value_t)]
    pub geometry: Geometry,

    /// How tiles of a channel are ordered before stitching
    #[arg(short, long, value_enum, default_value_t)]
    pub order: TileOrder,

    /// Process acquisition folders in parallel
    #[arg(short, long)]
    pub parallel: bool,
}

/// Arguments of the `grid` operation
#[derive(Args)]
pub struct GridArgs {
    /// Folder the stitched image is written to
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Output base name, written as <NAME>.png
    #[arg(short, long)]
    pub name: String,

    /// Tiles in raw acquisition order (9, 16 or 25 files)
    #[arg(value_name = "TILES", required = true)]
    pub tiles: Vec<PathBuf>,

    /// Canvas geometry for 4x4 and 5x5 grids
    #[arg(short, long, value_enum, default_value_t)]
    pub geometry: Geometry,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

impl BatchArgs {
    /// Runtime options selected by these arguments
    pub const fn run_config(&self) -> RunConfig {
        RunConfig {
            geometry: self.geometry,
            order: self.order,
            parallel: self.parallel,
        }
    }
}

/// Executes the parsed command and collects its status messages
pub struct CommandProcessor {
    cli: Cli,
}

impl CommandProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected operation
    ///
    /// Per-channel failures are reported as status messages, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch source folder cannot be listed
    pub fn process(&self) -> Result<Vec<StatusMessage>> {
        match &self.cli.command {
            Command::Batch(args) => self.process_batch(args),
            Command::Grid(args) => Ok(vec![Self::process_grid(args)]),
        }
    }

    fn process_batch(&self, args: &BatchArgs) -> Result<Vec<StatusMessage>> {
        if let Some(err) = missing_selection(&args.source, &args.dest) {
            return Ok(vec![StatusMessage::from(&err)]);
        }

        let folders = discover_acquisitions(&args.source)?;
        let mut processor = AcquisitionProcessor::new(args.run_config());
        if self.cli.should_show_progress() {
            processor = processor.with_progress(ProgressManager::new());
        }
        Ok(processor.run(&folders, &args.dest))
    }

    fn process_grid(args: &GridArgs) -> StatusMessage {
        match stitch(&args.tiles, &args.dest, &args.name, args.geometry) {
            Ok(outcome) => StatusMessage::stitched(&args.name, &outcome.output),
            Err(err) => StatusMessage::from(&err),
        }
    }
}

fn missing_selection(source: &Path, dest: &Path) -> Option<StitchError> {
    if source.as_os_str().is_empty() {
        Some(StitchError::NoSelection {
            what: "containing the images you want stitched",
        })
    } else if dest.as_os_str().is_empty() {
        Some(StitchError::NoSelection {
            what: "to save all the stitched images to",
        })
    } else {
        None
    }
}

/// Print status messages for the user, one per line
// Allow print for user-facing status output
#[allow(clippy::print_stdout)]
pub fn print_report(messages: &[StatusMessage]) {
    for message in messages {
        println!("{message}");
    }
}
