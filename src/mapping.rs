//! Conversion between the scaled on-screen canvas and the pixel grid.
//!
//! The displayed image is scaled by `ratio = min(extent/w, extent/h)` so the
//! longer edge fills the square canvas, and centered inside it. Going back
//! from a canvas position to a grid coordinate undoes the centering offset
//! and the scale, truncating toward zero exactly like the forward rendering
//! path does.

/// Scale state for the currently displayed image. Recomputed whenever the
/// displayed image changes size.
#[derive(Clone, Copy, Debug)]
pub struct DisplayMapping {
    /// Display-to-image scale factor.
    pub ratio: f64,
    /// Size of the scaled image on screen.
    pub displayed_w: u32,
    pub displayed_h: u32,
    /// Side length of the square canvas the image is centered in.
    pub canvas_extent: u32,
}

impl DisplayMapping {
    /// Fit an image of `image_w x image_h` into a square canvas of side
    /// `max_extent`, preserving aspect ratio.
    pub fn fit(image_w: u32, image_h: u32, max_extent: u32) -> Self {
        let ratio = f64::min(
            max_extent as f64 / image_w as f64,
            max_extent as f64 / image_h as f64,
        );
        Self {
            ratio,
            displayed_w: (image_w as f64 * ratio).round() as u32,
            displayed_h: (image_h as f64 * ratio).round() as u32,
            canvas_extent: max_extent,
        }
    }

    /// Offset of the displayed image's top-left corner inside the canvas
    /// (integer floor division, matching the render path).
    pub fn centering_offset(&self) -> (i64, i64) {
        (
            (self.canvas_extent as i64 - self.displayed_w as i64).div_euclid(2),
            (self.canvas_extent as i64 - self.displayed_h as i64).div_euclid(2),
        )
    }

    /// Map a canvas position to the pixel-grid coordinate under it, or `None`
    /// when no pixel is under the cursor. Subtracts the centering offset,
    /// divides by the scale ratio and truncates toward zero.
    pub fn display_to_image(
        &self,
        display_x: f64,
        display_y: f64,
        image_w: u32,
        image_h: u32,
    ) -> Option<(u32, u32)> {
        let (off_x, off_y) = self.centering_offset();
        let x = ((display_x - off_x as f64) / self.ratio).trunc() as i64;
        let y = ((display_y - off_y as f64) / self.ratio).trunc() as i64;
        if x >= 0 && (x as u64) < image_w as u64 && y >= 0 && (y as u64) < image_h as u64 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }

    /// Forward map: the canvas position of a pixel's top-left corner.
    pub fn image_to_display(&self, image_x: u32, image_y: u32) -> (f64, f64) {
        let (off_x, off_y) = self.centering_offset();
        (
            image_x as f64 * self.ratio + off_x as f64,
            image_y as f64 * self.ratio + off_y as f64,
        )
    }
}
