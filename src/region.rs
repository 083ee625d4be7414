//! Region descriptors for multi-pixel edits.
//!
//! A [`Selection`] describes where an edit applies; the fill operations
//! themselves live on [`crate::session::EditorSession`] so every mutation
//! goes through the history stack. Regions are order-independent and are
//! silently clipped to the image bounds — asking to fill outside the image
//! is not an error, the out-of-bounds part simply contributes no pixels.

use image::Rgb;

use crate::error::EditError;

/// A rectangle given by two corner points in pixel-grid coordinates, in any
/// order. Coordinates are signed so regions may extend past the image edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// A rectangle normalized and clipped to an image: `x_min..x_end` per axis,
/// end-exclusive, guaranteed non-empty and in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClippedRect {
    pub x_min: u32,
    pub y_min: u32,
    pub x_end: u32,
    pub y_end: u32,
}

impl PixelRect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalize the corners (min/max per axis) and clip to an image of the
    /// given dimensions. The rectangle is corner-inclusive: `(0,0)-(0,0)`
    /// covers one pixel. Returns `None` when nothing of it lies inside the
    /// image.
    pub fn clip(&self, width: u32, height: u32) -> Option<ClippedRect> {
        let x_min = self.x1.min(self.x2).max(0);
        let y_min = self.y1.min(self.y2).max(0);
        let x_end = (self.x1.max(self.x2) + 1).min(width as i64);
        let y_end = (self.y1.max(self.y2) + 1).min(height as i64);
        if x_end <= x_min || y_end <= y_min {
            return None;
        }
        Some(ClippedRect {
            x_min: x_min as u32,
            y_min: y_min as u32,
            x_end: x_end as u32,
            y_end: y_end as u32,
        })
    }

    /// Midpoint of the rectangle, used as the circle center when a circular
    /// fill is applied to a dragged rectangle.
    pub fn center(&self) -> (i64, i64) {
        ((self.x1 + self.x2).div_euclid(2), (self.y1 + self.y2).div_euclid(2))
    }

    pub fn width(&self) -> u64 {
        self.x1.abs_diff(self.x2)
    }

    pub fn height(&self) -> u64 {
        self.y1.abs_diff(self.y2)
    }
}

impl ClippedRect {
    pub fn pixel_count(&self) -> u64 {
        (self.x_end - self.x_min) as u64 * (self.y_end - self.y_min) as u64
    }
}

/// How a committed selection is turned into a region edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Rectangle,
    Circle,
    /// Reserved for a future freehand tool; applying it is rejected with
    /// [`EditError::UnsupportedMode`].
    Brush,
}

impl SelectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionMode::Rectangle => "Rectangle",
            SelectionMode::Circle => "Circle",
            SelectionMode::Brush => "Brush",
        }
    }

    /// Modes shown in the picker (excludes reserved variants).
    pub fn picker_modes() -> &'static [SelectionMode] {
        &[SelectionMode::Rectangle, SelectionMode::Circle]
    }

    /// Parse a mode name as entered on the command line. Unknown names are a
    /// typed error, never a silent fallback.
    pub fn parse(name: &str) -> Result<Self, EditError> {
        match name.to_lowercase().as_str() {
            "rectangle" | "rect" => Ok(SelectionMode::Rectangle),
            "circle" => Ok(SelectionMode::Circle),
            "brush" => Ok(SelectionMode::Brush),
            other => Err(EditError::UnsupportedMode(other.to_string())),
        }
    }
}

/// A fully specified region, ready to be applied.
#[derive(Clone, Copy, Debug)]
pub enum Selection {
    Rectangle(PixelRect),
    Circle { cx: i64, cy: i64, radius: i64 },
    Brush,
}

/// Validate parsed channel values and pack them into a pixel. Inputs arrive
/// as `i64` from text entry; anything outside 0–255 is rejected before any
/// mutation happens.
pub fn validate_color(r: i64, g: i64, b: i64) -> Result<Rgb<u8>, EditError> {
    let in_range = |v: i64| (0..=255).contains(&v);
    if in_range(r) && in_range(g) && in_range(b) {
        Ok(Rgb([r as u8, g as u8, b as u8]))
    } else {
        Err(EditError::InvalidColor { r, g, b })
    }
}
