//! Grid geometry: tile count validation, scan-order remapping and overlap-aware placement

use crate::io::configuration::{
    LEGACY_CANVAS_TRIM_X, LEGACY_CANVAS_TRIM_Y, LEGACY_GRID_SIDE, SUPPORTED_GRID_SIDES,
    TILE_OVERLAP_X, TILE_OVERLAP_Y,
};
use crate::io::error::{Result, StitchError};

/// Square grid derived from the number of tiles in a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    side: usize,
}

impl GridSpec {
    /// Derive the grid for `count` tiles
    ///
    /// Returns `None` unless `count` is 9, 16 or 25.
    pub fn from_tile_count(count: usize) -> Option<Self> {
        SUPPORTED_GRID_SIDES
            .iter()
            .find(|&&side| side * side == count)
            .map(|&side| Self { side })
    }

    /// Number of tiles along each edge
    pub const fn side(self) -> usize {
        self.side
    }

    /// Total number of tiles
    pub const fn tile_count(self) -> usize {
        self.side * self.side
    }
}

/// How tiles of a grid are laid out on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Geometry {
    /// Always lay out a 3x3 grid from the first nine raw tiles
    ///
    /// Reproduces the acquisition workstation's historical output, which for 4x4 and
    /// 5x5 scans produced a 3x3 composite.
    Legacy,
    /// Lay out all N x N tiles with the overlap applied between every pair of neighbours
    #[default]
    Generalized,
}

/// Where one tile lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Row-major grid position, which is also the paint order
    pub position: usize,
    /// Index of the tile in the raw input order
    pub source: usize,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Horizontal pixel offset on the canvas
    pub x: u32,
    /// Vertical pixel offset on the canvas
    pub y: u32,
}

/// Canvas size and tile placements for one stitch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Placements in paint order
    pub placements: Vec<TilePlacement>,
}

/// Raw input index of the tile shown at each row-major grid position
///
/// The instrument scans in a serpentine: the second row of a 3x3 scan arrives
/// right-to-left, so positions 3 and 5 swap. `Legacy` applies exactly that fixed
/// correction to the first nine slots. `Generalized` reverses every odd row of the
/// N x N grid, which is the same permutation for N = 3.
pub fn scan_order(spec: GridSpec, geometry: Geometry) -> Vec<usize> {
    match geometry {
        Geometry::Legacy => (0..LEGACY_GRID_SIDE * LEGACY_GRID_SIDE)
            .map(|position| match position {
                3 => 5,
                5 => 3,
                other => other,
            })
            .collect(),
        Geometry::Generalized => {
            let side = spec.side();
            (0..spec.tile_count())
                .map(|position| {
                    let (row, col) = (position / side, position % side);
                    if row % 2 == 1 {
                        row * side + (side - 1 - col)
                    } else {
                        position
                    }
                })
                .collect()
        }
    }
}

impl Layout {
    /// Plan the canvas for `spec` tiles of `tile_width` x `tile_height` pixels
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::TileTooSmall`] if the tiles are not strictly larger than the
    /// fixed overlap in both directions
    pub fn plan(
        spec: GridSpec,
        geometry: Geometry,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self> {
        let too_small = || StitchError::TileTooSmall {
            width: tile_width,
            height: tile_height,
        };
        let step_x = tile_width
            .checked_sub(TILE_OVERLAP_X)
            .filter(|&step| step > 0)
            .ok_or_else(too_small)?;
        let step_y = tile_height
            .checked_sub(TILE_OVERLAP_Y)
            .filter(|&step| step > 0)
            .ok_or_else(too_small)?;

        let (side, width, height) = match geometry {
            Geometry::Legacy => {
                let n = LEGACY_GRID_SIDE as u32;
                (
                    LEGACY_GRID_SIDE,
                    tile_width * n - LEGACY_CANVAS_TRIM_X,
                    tile_height * n - LEGACY_CANVAS_TRIM_Y,
                )
            }
            Geometry::Generalized => {
                let n = spec.side() as u32;
                (
                    spec.side(),
                    tile_width * n - (n - 1) * TILE_OVERLAP_X,
                    tile_height * n - (n - 1) * TILE_OVERLAP_Y,
                )
            }
        };

        let placements = scan_order(spec, geometry)
            .into_iter()
            .enumerate()
            .map(|(position, source)| {
                let (row, col) = (position / side, position % side);
                TilePlacement {
                    position,
                    source,
                    row,
                    col,
                    x: col as u32 * step_x,
                    y: row as u32 * step_y,
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            placements,
        })
    }

    /// Placement at grid cell (`row`, `col`), if that cell is painted
    pub fn placement_at(&self, row: usize, col: usize) -> Option<&TilePlacement> {
        self.placements
            .iter()
            .find(|placement| placement.row == row && placement.col == col)
    }
}
