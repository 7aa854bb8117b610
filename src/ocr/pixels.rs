//! Decoded image as a numeric pixel array.

use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageReader, RgbImage, RgbaImage};
use ndarray::Array3;

use crate::error::{Error, Result};

/// Pixel data shaped `(height, width, channels)`.
///
/// Channels are 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA), one `u8`
/// sample each.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    data: Array3<u8>,
}

impl PixelArray {
    /// Decode the image file at `path`.
    ///
    /// The format is detected from the file contents, so the extension may
    /// be wrong or missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = ImageReader::open(path)
            .map_err(|e| Error::from_io(path, e))?
            .with_guessed_format()?
            .decode()?;
        let pixels = Self::from_image(image)?;
        log::debug!(
            "Decoded {} ({}x{}, {} channels)",
            path.display(),
            pixels.width(),
            pixels.height(),
            pixels.channels()
        );
        Ok(pixels)
    }

    /// Build from a decoded image.
    ///
    /// 8-bit layouts are kept as they are. 16-bit and float images are
    /// converted to RGB8, or RGBA8 when they carry alpha.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let (channels, raw) = match image {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };
        Self::from_raw(width, height, channels, raw)
    }

    /// Build from interleaved row-major samples.
    pub fn from_raw(width: usize, height: usize, channels: usize, raw: Vec<u8>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(Error::PixelArray(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        let data = Array3::from_shape_vec((height, width, channels), raw)
            .map_err(|e| Error::PixelArray(e.to_string()))?;
        Ok(Self { data })
    }

    /// Wrap an existing array shaped `(height, width, channels)`.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let channels = data.dim().2;
        if !(1..=4).contains(&channels) {
            return Err(Error::PixelArray(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        Ok(Self { data })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// The underlying array.
    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    /// Convert back into an image with the matching color layout.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let (width, height) = (self.width() as u32, self.height() as u32);
        // Logical iteration order is row-major regardless of memory layout.
        let raw: Vec<u8> = self.data.iter().copied().collect();
        let bad_size = || Error::PixelArray("buffer does not match dimensions".to_string());

        let image = match self.channels() {
            1 => {
                DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, raw).ok_or_else(bad_size)?)
            }
            2 => DynamicImage::ImageLumaA8(
                GrayAlphaImage::from_raw(width, height, raw).ok_or_else(bad_size)?,
            ),
            3 => {
                DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, raw).ok_or_else(bad_size)?)
            }
            4 => DynamicImage::ImageRgba8(
                RgbaImage::from_raw(width, height, raw).ok_or_else(bad_size)?,
            ),
            n => {
                return Err(Error::PixelArray(format!("unsupported channel count {}", n)));
            }
        };
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgb32FImage};

    #[test]
    fn test_from_rgb_image_shape() {
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(3, 1, Rgb([10, 20, 30]));
        let pixels = PixelArray::from_image(DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(pixels.width(), 4);
        assert_eq!(pixels.height(), 2);
        assert_eq!(pixels.channels(), 3);
        assert_eq!(pixels.as_array()[[1, 3, 0]], 10);
        assert_eq!(pixels.as_array()[[1, 3, 2]], 30);
    }

    #[test]
    fn test_gray_stays_single_channel() {
        let img = GrayImage::from_pixel(3, 3, image::Luma([200]));
        let pixels = PixelArray::from_image(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(pixels.channels(), 1);
    }

    #[test]
    fn test_float_image_converted_to_rgb8() {
        let img = Rgb32FImage::from_pixel(2, 2, Rgb([1.0, 0.0, 0.0]));
        let pixels = PixelArray::from_image(DynamicImage::ImageRgb32F(img)).unwrap();
        assert_eq!(pixels.channels(), 3);
        assert_eq!(pixels.as_array()[[0, 0, 0]], 255);
    }

    #[test]
    fn test_to_image_preserves_pixels() {
        let mut img = RgbaImage::new(2, 3);
        img.put_pixel(1, 2, image::Rgba([1, 2, 3, 4]));
        let pixels = PixelArray::from_image(DynamicImage::ImageRgba8(img.clone())).unwrap();
        let back = pixels.to_image().unwrap();
        assert_eq!(back.to_rgba8(), img);
    }

    #[test]
    fn test_from_raw_rejects_bad_shape() {
        let result = PixelArray::from_raw(2, 2, 3, vec![0; 5]);
        assert!(matches!(result, Err(Error::PixelArray(_))));

        let result = PixelArray::from_raw(1, 1, 5, vec![0; 5]);
        assert!(matches!(result, Err(Error::PixelArray(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = PixelArray::load("no/such/image.png");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
