//! Image decoding, pixel format normalization and PNG/TIFF export

use crate::io::error::{Result, StitchError, file_system};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Pixel layouts accepted by both the PNG and the TIFF encoder
///
/// Composites and exports are normalized to one of these so that 16-bit microscopy
/// data keeps its depth while exotic layouts (float, luma+alpha) still encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit grayscale
    Luma8,
    /// 16-bit grayscale
    Luma16,
    /// 8-bit RGB
    Rgb8,
    /// 8-bit RGBA
    Rgba8,
    /// 16-bit RGB
    Rgb16,
    /// 16-bit RGBA
    Rgba16,
}

impl PixelFormat {
    /// Pick the encodable layout closest to `color`
    pub const fn of(color: ColorType) -> Self {
        match color {
            ColorType::L8 => Self::Luma8,
            ColorType::L16 => Self::Luma16,
            ColorType::Rgb8 => Self::Rgb8,
            ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb16,
            ColorType::La16 | ColorType::Rgba16 | ColorType::Rgba32F => Self::Rgba16,
            _ => Self::Rgba8,
        }
    }

    /// Color type of images in this layout
    pub const fn color_type(self) -> ColorType {
        match self {
            Self::Luma8 => ColorType::L8,
            Self::Luma16 => ColorType::L16,
            Self::Rgb8 => ColorType::Rgb8,
            Self::Rgba8 => ColorType::Rgba8,
            Self::Rgb16 => ColorType::Rgb16,
            Self::Rgba16 => ColorType::Rgba16,
        }
    }

    /// Convert `image` into this layout, passing it through when it already matches
    pub fn normalize(self, image: DynamicImage) -> DynamicImage {
        if image.color() == self.color_type() {
            return image;
        }
        match self {
            Self::Luma8 => DynamicImage::ImageLuma8(image.to_luma8()),
            Self::Luma16 => DynamicImage::ImageLuma16(image.to_luma16()),
            Self::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
            Self::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
            Self::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
            Self::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        }
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    let load_error = |e: std::io::Error| StitchError::ImageLoad {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    };
    // Instruments are not always truthful about extensions, so sniff the content
    ImageReader::open(path)
        .map_err(load_error)?
        .with_guessed_format()
        .map_err(load_error)
}

/// Decode the image at `path`
///
/// # Errors
///
/// Returns [`StitchError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    open_reader(path)?
        .decode()
        .map_err(|e| StitchError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read the dimensions of the image at `path` without decoding its pixels
///
/// # Errors
///
/// Returns [`StitchError::ImageLoad`] if the file cannot be opened or its header is invalid
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    open_reader(path)?
        .into_dimensions()
        .map_err(|e| StitchError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Encode `image` to `path` in `format`, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_image(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| file_system(parent, "create directory", e))?;
    }

    image
        .save_with_format(path, format)
        .map_err(|e| StitchError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
