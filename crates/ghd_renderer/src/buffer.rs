//! Pixel buffers for progressive rendering.
//!
//! `AccumulationBuffer` keeps the running radiance sum per pixel;
//! `DisplayBuffer` is the byte RGBA image derived from it. Both are
//! row-major with the top image row first.

use crate::error::{BufferError, BufferResult};
use crate::renderer::accumulated_to_rgba;
use crate::Color;
use rayon::prelude::*;

/// Bytes per display pixel (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

#[inline]
fn pixel_index(x: u32, y: u32, width: u32, height: u32) -> BufferResult<usize> {
    if x >= width || y >= height {
        return Err(BufferError::OutOfBounds { x, y, width, height });
    }
    Ok(y as usize * width as usize + x as usize)
}

/// Per-pixel running sum of radiance across iterations.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl AccumulationBuffer {
    /// Create a zeroed buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> BufferResult<Color> {
        let index = pixel_index(x, y, self.width, self.height)?;
        Ok(self.pixels[index])
    }

    /// Add a sample to the sum at (x, y).
    pub fn add(&mut self, x: u32, y: u32, sample: Color) -> BufferResult<()> {
        let index = pixel_index(x, y, self.width, self.height)?;
        self.pixels[index] += sample;
        Ok(())
    }

    /// All sums in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable rows for a parallel sweep; each row is handed to one worker.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Color> {
        let width = (self.width as usize).max(1);
        self.pixels.par_chunks_mut(width)
    }
}

/// Byte RGBA image presented to the display collaborator.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl DisplayBuffer {
    /// Create an all-zero buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bytes: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the RGBA value at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> BufferResult<[u8; 4]> {
        let start = pixel_index(x, y, self.width, self.height)? * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.bytes[start..start + BYTES_PER_PIXEL]);
        Ok(rgba)
    }

    /// Set the RGBA value at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> BufferResult<()> {
        let start = pixel_index(x, y, self.width, self.height)? * BYTES_PER_PIXEL;
        self.bytes[start..start + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        Ok(())
    }

    /// Raw bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Recompute every pixel from the accumulated sums.
    ///
    /// Always a full rebuild from `sum / iterations`; never blended with
    /// the previous image.
    pub fn resolve(&mut self, accumulation: &AccumulationBuffer, iterations: u32) -> BufferResult<()> {
        if accumulation.width != self.width || accumulation.height != self.height {
            return Err(BufferError::SizeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: accumulation.width,
                height: accumulation.height,
            });
        }

        self.bytes
            .par_chunks_mut(BYTES_PER_PIXEL)
            .zip(accumulation.pixels.par_iter())
            .for_each(|(out, sum)| out.copy_from_slice(&accumulated_to_rgba(*sum, iterations)));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation_add_and_get() {
        let mut buffer = AccumulationBuffer::new(4, 3);
        assert_eq!(buffer.pixels().len(), 12);

        buffer.add(3, 2, Color::new(0.1, 0.2, 0.3)).unwrap();
        buffer.add(3, 2, Color::new(0.1, 0.2, 0.3)).unwrap();
        let sum = buffer.get(3, 2).unwrap();
        assert!((sum - Color::new(0.2, 0.4, 0.6)).length() < 1e-12);
        assert_eq!(buffer.pixels()[11], sum);
        assert_eq!(buffer.get(0, 0).unwrap(), Color::ZERO);
    }

    #[test]
    fn test_accumulation_out_of_bounds() {
        let mut buffer = AccumulationBuffer::new(4, 3);
        let expected = BufferError::OutOfBounds { x: 4, y: 0, width: 4, height: 3 };

        assert_eq!(buffer.get(4, 0), Err(expected.clone()));
        assert_eq!(buffer.add(4, 0, Color::ONE), Err(expected));
        assert!(buffer.add(0, 3, Color::ONE).is_err());
        // Nothing was written
        assert!(buffer.pixels().iter().all(|c| *c == Color::ZERO));
    }

    #[test]
    fn test_display_out_of_bounds() {
        let mut display = DisplayBuffer::new(2, 2);
        assert!(matches!(display.pixel(2, 1), Err(BufferError::OutOfBounds { .. })));
        assert!(display.set_pixel(0, 5, [1, 2, 3, 4]).is_err());
        assert!(display.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_display_set_pixel() {
        let mut display = DisplayBuffer::new(2, 2);
        display.set_pixel(1, 0, [10, 20, 30, 255]).unwrap();

        assert_eq!(display.pixel(1, 0).unwrap(), [10, 20, 30, 255]);
        assert_eq!(&display.as_bytes()[4..8], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_resolve_is_full_recompute() {
        let mut accumulation = AccumulationBuffer::new(2, 1);
        let mut display = DisplayBuffer::new(2, 1);

        accumulation.add(0, 0, Color::splat(0.25)).unwrap();
        display.resolve(&accumulation, 1).unwrap();
        assert_eq!(display.pixel(0, 0).unwrap(), [127, 127, 127, 255]);
        assert_eq!(display.pixel(1, 0).unwrap(), [0, 0, 0, 255]);

        // Second iteration adds 0.75: mean 0.5 regardless of the previous image
        accumulation.add(0, 0, Color::splat(0.75)).unwrap();
        display.resolve(&accumulation, 2).unwrap();
        let expected = (255.0 * 0.5f64.sqrt()) as u8;
        assert_eq!(display.pixel(0, 0).unwrap(), [expected, expected, expected, 255]);
    }

    #[test]
    fn test_resolve_size_mismatch() {
        let accumulation = AccumulationBuffer::new(3, 1);
        let mut display = DisplayBuffer::new(2, 1);
        assert!(matches!(
            display.resolve(&accumulation, 1),
            Err(BufferError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_par_rows_cover_buffer() {
        let mut buffer = AccumulationBuffer::new(5, 4);
        buffer
            .par_rows_mut()
            .enumerate()
            .for_each(|(y, row)| {
                assert_eq!(row.len(), 5);
                for pixel in row.iter_mut() {
                    *pixel = Color::splat(y as f64);
                }
            });

        assert_eq!(buffer.get(4, 3).unwrap(), Color::splat(3.0));
        assert_eq!(buffer.get(0, 1).unwrap(), Color::splat(1.0));
    }
}
