//! FIRESIGHT - Feature Extraction
//!
//! Turns the two caller-supplied images into the numeric signals the
//! scorer and classifier consume: a mean-luminance brightness value and
//! a normalized 25-bin hue histogram.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage};
use serde::{Deserialize, Serialize};

use crate::error::{FireError, FireResult};

/// Number of hue histogram bins
pub const COLOR_BINS: usize = 25;

/// Working resolution for the hue histogram.
/// Fixed so the histogram is deterministic regardless of input size.
const SAMPLE_DIM: u32 = 64;

/// Additive epsilon guarding normalization of an all-zero histogram
const NORM_EPSILON: f64 = 1e-6;

/// Normalized 25-bin hue histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorVector(pub [f64; COLOR_BINS]);

impl ColorVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of all bins (~1.0 for any non-degenerate image)
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Extracted image signals for one analysis
#[derive(Debug, Clone)]
pub struct ImageFeatures {
    /// Mean luminance of the appliance photo, in [0, 1]
    pub brightness: f64,
    /// Hue distribution of the surrounding-area photo
    pub color_vector: ColorVector,
}

/// Image feature extractor
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Extract both signals from the appliance photo and area photo
    pub fn extract<P: AsRef<Path>>(photo: P, area: P) -> FireResult<ImageFeatures> {
        let photo = load_image(photo.as_ref())?;
        let area = load_image(area.as_ref())?;

        Ok(ImageFeatures {
            brightness: Self::brightness(&photo),
            color_vector: Self::color_vector(&area),
        })
    }

    /// Mean grayscale intensity normalized to [0, 1]
    pub fn brightness(img: &DynamicImage) -> f64 {
        let luma = img.to_luma8();
        let pixels = luma.as_raw();

        if pixels.is_empty() {
            return 0.0;
        }

        let sum: u64 = pixels.iter().map(|&p| p as u64).sum();
        sum as f64 / pixels.len() as f64 / 255.0
    }

    /// 25-bin hue histogram over a 64x64 resample, normalized by
    /// total count plus epsilon
    pub fn color_vector(img: &DynamicImage) -> ColorVector {
        let small = img
            .resize_exact(SAMPLE_DIM, SAMPLE_DIM, FilterType::Triangle)
            .to_rgb8();

        let mut hist = [0.0f64; COLOR_BINS];
        for pixel in small.pixels() {
            let hue = rgb_hue(pixel.0[0], pixel.0[1], pixel.0[2]);
            let bin = ((hue / 360.0 * COLOR_BINS as f64) as usize).min(COLOR_BINS - 1);
            hist[bin] += 1.0;
        }

        let total: f64 = hist.iter().sum::<f64>() + NORM_EPSILON;
        for bin in hist.iter_mut() {
            *bin /= total;
        }

        ColorVector(hist)
    }
}

fn load_image(path: &Path) -> FireResult<DynamicImage> {
    if !path.exists() {
        return Err(FireError::Image(format!(
            "image not found: {}",
            path.display()
        )));
    }
    Ok(image::open(path)?)
}

/// Hue of an RGB pixel in degrees [0, 360).
/// Achromatic pixels (max == min) report hue 0.
fn rgb_hue(r: u8, g: u8, b: u8) -> f64 {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return 0.0;
    }

    let hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    if hue < 0.0 {
        hue + 360.0
    } else {
        hue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(r: u8, g: u8, b: u8) -> DynamicImage {
        let mut img = RgbImage::new(128, 96);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([r, g, b]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(FeatureExtractor::brightness(&solid(0, 0, 0)), 0.0);
        assert_eq!(FeatureExtractor::brightness(&solid(255, 255, 255)), 1.0);

        let mid = FeatureExtractor::brightness(&solid(128, 128, 128));
        assert!(mid > 0.4 && mid < 0.6);
    }

    #[test]
    fn test_color_vector_shape() {
        let vec = FeatureExtractor::color_vector(&solid(200, 30, 30));

        assert_eq!(vec.as_slice().len(), COLOR_BINS);
        assert!(vec.as_slice().iter().all(|&v| v >= 0.0));
        assert!((vec.total() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_solid_red_lands_in_first_bin() {
        // Pure red has hue 0, so every pixel falls in bin 0
        let vec = FeatureExtractor::color_vector(&solid(255, 0, 0));
        assert!(vec.0[0] > 0.99);
        assert!(vec.0[1..].iter().all(|&v| v < 1e-9));
    }

    #[test]
    fn test_color_vector_deterministic() {
        let img = solid(30, 90, 210);
        let a = FeatureExtractor::color_vector(&img);
        let b = FeatureExtractor::color_vector(&img);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hue_formula() {
        assert_eq!(rgb_hue(255, 0, 0), 0.0);
        assert_eq!(rgb_hue(0, 255, 0), 120.0);
        assert_eq!(rgb_hue(0, 0, 255), 240.0);
        // Achromatic pixels fall back to hue 0
        assert_eq!(rgb_hue(77, 77, 77), 0.0);
    }

    #[test]
    fn test_missing_image_fails() {
        let err = FeatureExtractor::extract("/no/such/photo.png", "/no/such/area.png");
        assert!(matches!(err, Err(FireError::Image(_))));
    }
}
