//! The mutable pixel grid and its pristine original.
//!
//! A [`PixelBuffer`] owns two RGB grids: `current`, which every edit mutates
//! in place, and `original`, captured once at load time and only ever read
//! back by [`PixelBuffer::restore_original`]. Both always share the same
//! dimensions.

use image::{Rgb, RgbImage};

use crate::error::EditError;

/// An independent deep copy of the current grid, stored in the undo history.
/// Cloning an `RgbImage` copies the backing `Vec`, so a snapshot is never
/// affected by later in-place edits.
pub type Snapshot = RgbImage;

#[derive(Debug)]
pub struct PixelBuffer {
    current: RgbImage,
    original: RgbImage,
}

impl PixelBuffer {
    /// Wrap an already-decoded RGB grid, capturing it as the original.
    pub fn from_image(img: RgbImage) -> Self {
        Self {
            original: img.clone(),
            current: img,
        }
    }

    /// Decode raw image data (PNG, JPEG, BMP, GIF) into a buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, EditError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| EditError::Decode(e.to_string()))?
            .to_rgb8();
        Ok(Self::from_image(img))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    /// Bounds check for a signed coordinate pair. Returns the in-range
    /// unsigned coordinates or an [`EditError::OutOfRange`] naming the
    /// maximum valid coordinate.
    pub fn check_bounds(&self, x: i64, y: i64) -> Result<(u32, u32), EditError> {
        let (w, h) = self.dimensions();
        if x >= 0 && (x as u64) < w as u64 && y >= 0 && (y as u64) < h as u64 {
            Ok((x as u32, y as u32))
        } else {
            Err(EditError::OutOfRange {
                x,
                y,
                max_x: w - 1,
                max_y: h - 1,
            })
        }
    }

    pub fn get_pixel(&self, x: i64, y: i64) -> Result<Rgb<u8>, EditError> {
        let (x, y) = self.check_bounds(x, y)?;
        Ok(*self.current.get_pixel(x, y))
    }

    /// Set one pixel. Validates bounds before touching the grid; on failure
    /// nothing is mutated.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>) -> Result<(), EditError> {
        let (x, y) = self.check_bounds(x, y)?;
        self.current.put_pixel(x, y, color);
        Ok(())
    }

    /// Copy the pristine original back into the current grid.
    pub fn restore_original(&mut self) {
        self.current = self.original.clone();
    }

    /// Deep copy of the current grid for the undo history.
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Replace the current grid with a previously taken snapshot.
    pub fn restore_snapshot(&mut self, snapshot: Snapshot) {
        self.current = snapshot;
    }

    /// The current grid, ready for encoding or texture upload.
    pub fn export(&self) -> &RgbImage {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut RgbImage {
        &mut self.current
    }
}
