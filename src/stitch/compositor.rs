//! Loads one channel's tiles, composites them onto a single canvas and writes the result

use crate::io::configuration::{LEGACY_GRID_SIDE, STITCHED_OUTPUT_EXTENSION};
use crate::io::error::{Result, StitchError, invalid_parameter};
use crate::io::image::{PixelFormat, load_image, save_image};
use crate::stitch::grid::{Geometry, GridSpec, Layout, TilePlacement};
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Pixel, imageops};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful stitch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchOutcome {
    /// Written composite
    pub output: PathBuf,
    /// Grid derived from the tile count
    pub grid: GridSpec,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Number of tiles painted onto the canvas
    pub tiles_placed: usize,
}

/// Path of the composite for `base_name` inside `dest_dir`
pub fn output_path(dest_dir: &Path, base_name: &str) -> PathBuf {
    dest_dir.join(format!("{base_name}.{STITCHED_OUTPUT_EXTENSION}"))
}

/// Stitch one channel's tiles into `<dest_dir>/<base_name>.png`
///
/// `tiles` must be in raw acquisition order; the scan-order correction is applied here.
/// Nothing is written unless every placed tile loads and shares the same dimensions.
///
/// # Errors
///
/// Returns an error if:
/// - The number of tiles is not 9, 16 or 25 ([`StitchError::WrongTileCount`])
/// - A placed tile cannot be decoded ([`StitchError::ImageLoad`])
/// - Placed tiles differ in size ([`StitchError::DimensionMismatch`]) or are not larger
///   than the overlap ([`StitchError::TileTooSmall`])
/// - The destination cannot be created or written
pub fn stitch<P: AsRef<Path>>(
    tiles: &[P],
    dest_dir: &Path,
    base_name: &str,
    geometry: Geometry,
) -> Result<StitchOutcome> {
    let grid = GridSpec::from_tile_count(tiles.len()).ok_or_else(|| StitchError::WrongTileCount {
        name: base_name.to_string(),
        count: tiles.len(),
    })?;

    // Legacy geometry only ever paints the first nine raw tiles
    let used = match geometry {
        Geometry::Legacy => tiles
            .get(..LEGACY_GRID_SIDE * LEGACY_GRID_SIDE)
            .unwrap_or(tiles),
        Geometry::Generalized => tiles,
    };
    debug!(
        name = base_name,
        side = grid.side(),
        tiles = used.len(),
        "stitching channel"
    );

    let images = load_uniform_tiles(used)?;
    let (tile_width, tile_height) = images
        .first()
        .map(GenericImageView::dimensions)
        .ok_or_else(|| invalid_parameter("tiles", &0, &"no tiles to stitch"))?;

    let layout = Layout::plan(grid, geometry, tile_width, tile_height)?;
    let canvas = compose(&layout, &images)?;

    let output = output_path(dest_dir, base_name);
    save_image(&canvas, &output, ImageFormat::Png)?;

    info!(
        name = base_name,
        output = %output.display(),
        width = layout.width,
        height = layout.height,
        "stitched channel"
    );

    Ok(StitchOutcome {
        output,
        grid,
        width: layout.width,
        height: layout.height,
        tiles_placed: layout.placements.len(),
    })
}

// Decodes every tile, rejecting any whose size differs from the first
fn load_uniform_tiles<P: AsRef<Path>>(tiles: &[P]) -> Result<Vec<DynamicImage>> {
    let mut images: Vec<DynamicImage> = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let path = tile.as_ref();
        let image = load_image(path)?;
        if let Some(first) = images.first()
            && first.dimensions() != image.dimensions()
        {
            return Err(StitchError::DimensionMismatch {
                path: path.to_path_buf(),
                expected: first.dimensions(),
                found: image.dimensions(),
            });
        }
        images.push(image);
    }
    Ok(images)
}

/// Paint `tiles` (in raw order) onto a fresh canvas following `layout`
///
/// The canvas takes the pixel layout of the tile at the first grid position; later
/// tiles are converted to it. Overlaps are resolved by paint order, the last tile wins.
///
/// # Errors
///
/// Returns [`StitchError::InvalidParameter`] if a placement refers to a tile that is not
/// in `tiles`
pub fn compose(layout: &Layout, tiles: &[DynamicImage]) -> Result<DynamicImage> {
    let first = layout
        .placements
        .first()
        .and_then(|placement| tiles.get(placement.source))
        .ok_or_else(|| invalid_parameter("tiles", &tiles.len(), &"no tile for grid position 0"))?;

    Ok(match PixelFormat::of(first.color()) {
        PixelFormat::Luma8 => {
            DynamicImage::ImageLuma8(paint(layout, tiles, DynamicImage::to_luma8)?)
        }
        PixelFormat::Luma16 => {
            DynamicImage::ImageLuma16(paint(layout, tiles, DynamicImage::to_luma16)?)
        }
        PixelFormat::Rgb8 => DynamicImage::ImageRgb8(paint(layout, tiles, DynamicImage::to_rgb8)?),
        PixelFormat::Rgba8 => {
            DynamicImage::ImageRgba8(paint(layout, tiles, DynamicImage::to_rgba8)?)
        }
        PixelFormat::Rgb16 => {
            DynamicImage::ImageRgb16(paint(layout, tiles, DynamicImage::to_rgb16)?)
        }
        PixelFormat::Rgba16 => {
            DynamicImage::ImageRgba16(paint(layout, tiles, DynamicImage::to_rgba16)?)
        }
    })
}

fn paint<Px: Pixel>(
    layout: &Layout,
    tiles: &[DynamicImage],
    convert: fn(&DynamicImage) -> ImageBuffer<Px, Vec<Px::Subpixel>>,
) -> Result<ImageBuffer<Px, Vec<Px::Subpixel>>> {
    let mut canvas = ImageBuffer::new(layout.width, layout.height);
    for placement in &layout.placements {
        let tile = tiles
            .get(placement.source)
            .ok_or_else(|| missing_tile(placement, tiles.len()))?;
        imageops::replace(
            &mut canvas,
            &convert(tile),
            i64::from(placement.x),
            i64::from(placement.y),
        );
    }
    Ok(canvas)
}

fn missing_tile(placement: &TilePlacement, available: usize) -> StitchError {
    invalid_parameter(
        "tiles",
        &available,
        &format!(
            "grid position {} needs raw tile {}",
            placement.position, placement.source
        ),
    )
}
