use super::Fingerprint;
use image::RgbImage;
use palette::white_point::D65;
use palette::{IntoColor, Lab, Srgb};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid image: {width}x{height} buffer has no pixels")]
    InvalidImage { width: u32, height: u32 },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot resolve {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { path: PathBuf },
}

/// Mean L*a*b* color of an RGB buffer.
///
/// Every pixel is converted from sRGB to L*a*b* first and the three channels
/// are averaged afterwards, so the result is the mean perceptual color rather
/// than the color of the mean RGB value.
pub fn fingerprint_image(img: &RgbImage) -> Result<Fingerprint, ExtractError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || img.as_raw().is_empty() {
        return Err(ExtractError::InvalidImage { width, height });
    }

    // Rows are converted in parallel but summed in row order, which keeps the
    // floating point result identical between runs.
    let row_sums: Vec<[f64; 3]> = img
        .as_raw()
        .par_chunks_exact(width as usize * 3)
        .map(|row| {
            row.chunks_exact(3).fold([0.0f64; 3], |mut acc, px| {
                let rgb = Srgb::new(px[0], px[1], px[2]).into_format::<f64>();
                let lab: Lab<D65, f64> = rgb.into_color();
                acc[0] += lab.l;
                acc[1] += lab.a;
                acc[2] += lab.b;
                acc
            })
        })
        .collect();

    let mut total = [0.0f64; 3];
    for row in &row_sums {
        total[0] += row[0];
        total[1] += row[1];
        total[2] += row[2];
    }

    let count = width as f64 * height as f64;
    Ok(Fingerprint::new(
        total[0] / count,
        total[1] / count,
        total[2] / count,
    ))
}

/// Decode an image file and compute its fingerprint.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, ExtractError> {
    let img = image::open(path).map_err(|source| ExtractError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    fingerprint_image(&img.to_rgb8())
}
