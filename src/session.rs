//! The editor session — the single owned state object behind every operation.
//!
//! An [`EditorSession`] owns the pixel buffer, the undo history, and the
//! active selection. The UI and the CLI only ever talk to this type, which
//! keeps the core testable without any display surface.
//!
//! Every mutating region operation follows the same protocol:
//!   1. validate inputs (channel range, bounds where applicable) — nothing
//!      is touched on failure;
//!   2. push one snapshot onto the history so a single undo reverts the
//!      whole operation, no matter how many pixels it touched;
//!   3. mutate, clipping the region to the image bounds.

use std::path::{Path, PathBuf};

use image::Rgb;

use crate::buffer::PixelBuffer;
use crate::error::EditError;
use crate::history::HistoryStack;
use crate::io;
use crate::region::{PixelRect, Selection, validate_color};

/// Result of a successful mutating operation: how many pixels changed and a
/// human-readable summary for the status line.
pub struct EditOutcome {
    pub changed: u64,
    pub message: String,
}

#[derive(Default)]
pub struct EditorSession {
    buffer: Option<PixelBuffer>,
    history: HistoryStack,
    /// Rectangle committed by the last canvas drag, in pixel coordinates.
    pub selection: Option<PixelRect>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an already-built buffer (fresh history, no
    /// selection).
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            buffer: Some(buffer),
            history: HistoryStack::default(),
            selection: None,
        }
    }

    pub fn has_image(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(|b| b.dimensions())
    }

    /// Number of snapshots currently available to undo.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Color of the pixel under a grid coordinate, or `None` when outside
    /// the image (or when no image is loaded). Used by hover readouts.
    pub fn pixel_at(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        self.buffer.as_ref()?.get_pixel(x, y).ok()
    }

    fn buffer_mut(&mut self) -> Result<&mut PixelBuffer, EditError> {
        self.buffer.as_mut().ok_or(EditError::NoImage)
    }

    // ------------------------------------------------------------------
    // Load / save / restore
    // ------------------------------------------------------------------

    /// Load an image file, replacing both grids and clearing the history.
    /// On failure the previous buffer, if any, stays active. Returns an
    /// info message naming the file, its dimensions and pixel count.
    pub fn load_path(&mut self, path: &Path) -> Result<String, EditError> {
        let img = io::load_rgb(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.install(PixelBuffer::from_image(img), &name))
    }

    /// Decode raw image bytes, replacing both grids and clearing the history.
    pub fn load_bytes(&mut self, bytes: &[u8], name: &str) -> Result<String, EditError> {
        let buffer = PixelBuffer::decode(bytes)?;
        Ok(self.install(buffer, name))
    }

    fn install(&mut self, buffer: PixelBuffer, name: &str) -> String {
        let (w, h) = buffer.dimensions();
        self.buffer = Some(buffer);
        self.history.clear();
        self.selection = None;
        format!(
            "{} | Size: {} x {} px | Total pixels: {}",
            name,
            w,
            h,
            w as u64 * h as u64
        )
    }

    /// Encode the current grid to `path` (extension decides the format,
    /// `.png` appended when missing). Returns the path actually written.
    pub fn save_path(&self, path: &Path) -> Result<PathBuf, EditError> {
        let buffer = self.buffer.as_ref().ok_or(EditError::NoImage)?;
        io::save_rgb(buffer.export(), path)
    }

    /// Reset the current grid to the originally loaded image and clear the
    /// history.
    pub fn restore_original(&mut self) -> Result<(), EditError> {
        self.buffer_mut()?.restore_original();
        self.history.clear();
        Ok(())
    }

    /// Revert the most recent mutating operation. `false` means there was
    /// nothing to undo — an informational outcome, not an error.
    pub fn undo(&mut self) -> bool {
        let (Some(buffer), Some(snapshot)) = (self.buffer.as_mut(), self.history.pop()) else {
            return false;
        };
        buffer.restore_snapshot(snapshot);
        true
    }

    // ------------------------------------------------------------------
    // Region edits
    // ------------------------------------------------------------------

    /// Repaint a single pixel. Out-of-range coordinates are a hard error
    /// here (unlike region fills, which clip).
    pub fn set_single_pixel(
        &mut self,
        x: i64,
        y: i64,
        r: i64,
        g: i64,
        b: i64,
    ) -> Result<EditOutcome, EditError> {
        let color = validate_color(r, g, b)?;
        let buffer = self.buffer_mut()?;
        // Validate fully before pushing: a failed set must leave both the
        // buffer and the history untouched.
        buffer.check_bounds(x, y)?;
        let snapshot = buffer.snapshot();
        self.history.push(snapshot);
        let buffer = self.buffer_mut()?;
        buffer.set_pixel(x, y, color)?;
        Ok(EditOutcome {
            changed: 1,
            message: format!("Pixel ({}, {}) changed to RGB({}, {}, {})", x, y, r, g, b),
        })
    }

    /// Fill the corner-inclusive rectangle with one color. Out-of-bounds
    /// parts are clipped; a fully clipped rectangle is a success with a
    /// changed count of zero (and still one history entry).
    pub fn fill_rectangle(
        &mut self,
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        r: i64,
        g: i64,
        b: i64,
    ) -> Result<EditOutcome, EditError> {
        let color = validate_color(r, g, b)?;
        let buffer = self.buffer_mut()?;
        let (w, h) = buffer.dimensions();
        let snapshot = buffer.snapshot();
        self.history.push(snapshot);

        let mut changed = 0u64;
        if let Some(rect) = PixelRect::new(x1, y1, x2, y2).clip(w, h) {
            let img = self.buffer_mut()?.current_mut();
            for y in rect.y_min..rect.y_end {
                for x in rect.x_min..rect.x_end {
                    img.put_pixel(x, y, color);
                }
            }
            changed = rect.pixel_count();
        }
        Ok(EditOutcome {
            changed,
            message: format!("{} pixels changed to RGB({}, {}, {})", changed, r, g, b),
        })
    }

    /// Fill every pixel whose Euclidean distance to `(cx, cy)` is at most
    /// `radius`, clipped to the image. Radius 0 covers at most the center
    /// pixel; a negative radius covers nothing.
    pub fn fill_circle(
        &mut self,
        cx: i64,
        cy: i64,
        radius: i64,
        r: i64,
        g: i64,
        b: i64,
    ) -> Result<EditOutcome, EditError> {
        let color = validate_color(r, g, b)?;
        let buffer = self.buffer_mut()?;
        let (w, h) = buffer.dimensions();
        let snapshot = buffer.snapshot();
        self.history.push(snapshot);

        let mut changed = 0u64;
        if let Some(bounds) =
            PixelRect::new(cx - radius, cy - radius, cx + radius, cy + radius).clip(w, h)
        {
            let img = self.buffer_mut()?.current_mut();
            for y in bounds.y_min..bounds.y_end {
                for x in bounds.x_min..bounds.x_end {
                    let dx = (x as i64 - cx) as f64;
                    let dy = (y as i64 - cy) as f64;
                    if (dx * dx + dy * dy).sqrt() <= radius as f64 {
                        img.put_pixel(x, y, color);
                        changed += 1;
                    }
                }
            }
        }
        Ok(EditOutcome {
            changed,
            message: format!("{} pixels changed in circle", changed),
        })
    }

    /// Apply a color to a fully specified selection. The reserved brush
    /// mode is rejected with a typed error.
    pub fn apply_selection(
        &mut self,
        selection: &Selection,
        r: i64,
        g: i64,
        b: i64,
    ) -> Result<EditOutcome, EditError> {
        match *selection {
            Selection::Rectangle(rect) => {
                self.fill_rectangle(rect.x1, rect.y1, rect.x2, rect.y2, r, g, b)
            }
            Selection::Circle { cx, cy, radius } => self.fill_circle(cx, cy, radius, r, g, b),
            Selection::Brush => Err(EditError::UnsupportedMode("brush".to_string())),
        }
    }

    /// Per-channel mean over the normalized, clipped rectangle, truncated
    /// toward zero (integer division of the channel sums — bit-reproducible).
    /// `None` when the clipped rectangle is empty.
    pub fn average_color(
        &self,
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
    ) -> Result<Option<Rgb<u8>>, EditError> {
        let buffer = self.buffer.as_ref().ok_or(EditError::NoImage)?;
        let (w, h) = buffer.dimensions();
        let Some(rect) = PixelRect::new(x1, y1, x2, y2).clip(w, h) else {
            return Ok(None);
        };
        let img = buffer.export();
        let mut sums = [0u64; 3];
        for y in rect.y_min..rect.y_end {
            for x in rect.x_min..rect.x_end {
                let p = img.get_pixel(x, y);
                for c in 0..3 {
                    sums[c] += p.0[c] as u64;
                }
            }
        }
        let count = rect.pixel_count();
        Ok(Some(Rgb([
            (sums[0] / count) as u8,
            (sums[1] / count) as u8,
            (sums[2] / count) as u8,
        ])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn session(w: u32, h: u32) -> EditorSession {
        EditorSession::from_buffer(PixelBuffer::from_image(RgbImage::from_pixel(
            w,
            h,
            Rgb([10, 20, 30]),
        )))
    }

    fn raw(session: &EditorSession) -> Vec<u8> {
        session.buffer().unwrap().export().as_raw().clone()
    }

    #[test]
    fn undo_is_a_strict_inverse_of_each_operation_kind() {
        let mut s = session(10, 10);

        let before = raw(&s);
        s.set_single_pixel(3, 3, 1, 2, 3).unwrap();
        assert_ne!(raw(&s), before);
        assert!(s.undo());
        assert_eq!(raw(&s), before);

        let before = raw(&s);
        s.fill_rectangle(1, 1, 8, 8, 200, 100, 50).unwrap();
        assert!(s.undo());
        assert_eq!(raw(&s), before);

        let before = raw(&s);
        s.fill_circle(5, 5, 3, 0, 0, 0).unwrap();
        assert!(s.undo());
        assert_eq!(raw(&s), before);
    }

    #[test]
    fn failed_validation_mutates_nothing() {
        let mut s = session(10, 10);
        let before = raw(&s);

        assert!(matches!(
            s.set_single_pixel(3, 3, 300, 0, 0),
            Err(EditError::InvalidColor { .. })
        ));
        assert!(matches!(
            s.set_single_pixel(50, 3, 0, 0, 0),
            Err(EditError::OutOfRange { .. })
        ));
        assert!(matches!(
            s.fill_rectangle(0, 0, 5, 5, -1, 0, 0),
            Err(EditError::InvalidColor { .. })
        ));
        assert!(matches!(
            s.fill_circle(5, 5, 2, 0, 256, 0),
            Err(EditError::InvalidColor { .. })
        ));

        assert_eq!(raw(&s), before);
        assert_eq!(s.undo_depth(), 0, "no history entry on failure");
    }

    #[test]
    fn rectangle_fill_reports_clipped_count() {
        let mut s = session(10, 10);
        let out = s.fill_rectangle(8, 8, 15, 15, 9, 9, 9).unwrap();
        assert_eq!(out.changed, 4); // 2x2 survives clipping
        assert_eq!(s.pixel_at(9, 9).unwrap(), Rgb([9, 9, 9]));
        assert_eq!(s.pixel_at(7, 7).unwrap(), Rgb([10, 20, 30]));
    }

    #[test]
    fn fully_outside_rectangle_changes_nothing_but_still_pushes_history() {
        let mut s = session(10, 10);
        let before = raw(&s);
        let out = s.fill_rectangle(20, 20, 30, 30, 0, 0, 0).unwrap();
        assert_eq!(out.changed, 0);
        assert_eq!(raw(&s), before);
        assert_eq!(s.undo_depth(), 1);
        assert!(s.undo());
        assert!(!s.undo());
    }

    #[test]
    fn circle_pixel_counts_match_euclidean_membership() {
        let mut s = session(10, 10);
        assert_eq!(s.fill_circle(5, 5, 0, 0, 0, 0).unwrap().changed, 1);

        let mut s = session(10, 10);
        assert_eq!(s.fill_circle(5, 5, 1, 0, 0, 0).unwrap().changed, 5);

        // radius 2 at (5,5): all |d| <= 2 -> 13 pixels of the 5x5 box.
        let mut s = session(10, 10);
        let out = s.fill_circle(5, 5, 2, 7, 7, 7).unwrap();
        assert_eq!(out.changed, 13);
        let img = s.buffer().unwrap().export();
        for y in 0..10i64 {
            for x in 0..10i64 {
                let dist = (((x - 5).pow(2) + (y - 5).pow(2)) as f64).sqrt();
                let expect = if dist <= 2.0 { Rgb([7, 7, 7]) } else { Rgb([10, 20, 30]) };
                assert_eq!(*img.get_pixel(x as u32, y as u32), expect, "at ({}, {})", x, y);
            }
        }

        // clipped at the corner
        let mut s = session(10, 10);
        assert_eq!(s.fill_circle(0, 0, 1, 0, 0, 0).unwrap().changed, 3);

        // negative radius covers nothing
        let mut s = session(10, 10);
        assert_eq!(s.fill_circle(5, 5, -1, 0, 0, 0).unwrap().changed, 0);
    }

    #[test]
    fn history_bound_limits_undo_depth() {
        let mut s = session(4, 4);
        let k = 3;
        for i in 0..(crate::config::HISTORY_CAPACITY + k) as i64 {
            s.set_single_pixel(0, 0, i % 256, 0, 0).unwrap();
        }
        let mut undone = 0;
        while s.undo() {
            undone += 1;
        }
        assert_eq!(undone, crate::config::HISTORY_CAPACITY);
    }

    #[test]
    fn restore_original_reverts_everything_and_clears_history() {
        let mut s = session(6, 6);
        let pristine = raw(&s);
        s.fill_rectangle(0, 0, 5, 5, 1, 1, 1).unwrap();
        s.set_single_pixel(2, 2, 9, 9, 9).unwrap();
        s.restore_original().unwrap();
        assert_eq!(raw(&s), pristine);
        assert!(!s.undo(), "restore clears the history");
    }

    #[test]
    fn average_color_truncates_and_handles_uniform_regions() {
        let s = session(10, 10);
        assert_eq!(s.average_color(2, 2, 7, 7).unwrap(), Some(Rgb([10, 20, 30])));

        // 1x2 region with channel values 10 and 11: mean 10.5 truncates to 10.
        let mut img = RgbImage::from_pixel(2, 1, Rgb([10, 0, 255]));
        img.put_pixel(1, 0, Rgb([11, 1, 254]));
        let s = EditorSession::from_buffer(PixelBuffer::from_image(img));
        assert_eq!(s.average_color(0, 0, 1, 0).unwrap(), Some(Rgb([10, 0, 254])));
    }

    #[test]
    fn average_over_empty_clip_is_not_available() {
        let s = session(10, 10);
        assert_eq!(s.average_color(20, 20, 30, 30).unwrap(), None);
        assert_eq!(s.average_color(-5, -5, -1, -1).unwrap(), None);
        // Degenerate-but-inside rectangles are corner-inclusive, so (3,3)-(3,3)
        // is one pixel, not empty.
        assert_eq!(s.average_color(3, 3, 3, 3).unwrap(), Some(Rgb([10, 20, 30])));
    }

    #[test]
    fn brush_selection_is_rejected() {
        let mut s = session(4, 4);
        assert!(matches!(
            s.apply_selection(&Selection::Brush, 0, 0, 0),
            Err(EditError::UnsupportedMode(m)) if m == "brush"
        ));
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn loading_replaces_grids_and_clears_history() {
        let mut s = session(4, 4);
        s.set_single_pixel(0, 0, 1, 1, 1).unwrap();
        assert_eq!(s.undo_depth(), 1);

        let mut png = Vec::new();
        let img = RgbImage::from_pixel(3, 2, Rgb([5, 6, 7]));
        img.write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageOutputFormat::Png,
        )
        .unwrap();

        let msg = s.load_bytes(&png, "tiny.png").unwrap();
        assert!(msg.contains("3 x 2"));
        assert!(msg.contains("Total pixels: 6"));
        assert_eq!(s.dimensions(), Some((3, 2)));
        assert!(!s.undo(), "pending undo from the previous image is gone");

        // The new original is the new image: restore matches it.
        s.fill_rectangle(0, 0, 2, 1, 0, 0, 0).unwrap();
        s.restore_original().unwrap();
        assert!(s.buffer().unwrap().export().pixels().all(|p| *p == Rgb([5, 6, 7])));
    }

    #[test]
    fn decode_failure_leaves_previous_state_active() {
        let mut s = session(4, 4);
        s.set_single_pixel(0, 0, 1, 1, 1).unwrap();
        let err = s.load_bytes(b"not an image", "bad.png").unwrap_err();
        assert!(matches!(err, EditError::Decode(_)));
        assert_eq!(s.dimensions(), Some((4, 4)));
        assert_eq!(s.undo_depth(), 1, "history survives a failed load");
    }

    #[test]
    fn operations_without_an_image_say_so() {
        let mut s = EditorSession::new();
        assert!(matches!(s.set_single_pixel(0, 0, 0, 0, 0), Err(EditError::NoImage)));
        assert!(matches!(s.fill_rectangle(0, 0, 1, 1, 0, 0, 0), Err(EditError::NoImage)));
        assert!(matches!(s.average_color(0, 0, 1, 1), Err(EditError::NoImage)));
        assert!(matches!(s.restore_original(), Err(EditError::NoImage)));
        assert!(!s.undo());
    }
}
