//! Crate-wide error type.
//!
//! Every fallible core operation returns `Result<_, EditError>`. "Nothing to
//! do" outcomes (empty undo history, empty average region, no pixel under the
//! cursor) are **not** errors — they are `Option::None` returns so the caller
//! can show an informational message instead of an alarming one.

use std::fmt;

/// Error type for all editing, parsing and I/O operations.
#[derive(Debug)]
pub enum EditError {
    /// The input data was not a decodable raster image. Carries the codec's
    /// own error text so the user sees the underlying cause.
    Decode(String),
    /// The current image could not be encoded/written.
    Encode(String),
    /// Filesystem failure unrelated to the codec.
    Io(std::io::Error),
    /// A coordinate fell outside the current image bounds.
    OutOfRange { x: i64, y: i64, max_x: u32, max_y: u32 },
    /// A color channel fell outside 0–255.
    InvalidColor { r: i64, g: i64, b: i64 },
    /// A selection mode that is reserved or unknown.
    UnsupportedMode(String),
    /// An operation that needs a loaded image ran without one.
    NoImage,
    /// Text input that was expected to be a whole number.
    Parse { field: &'static str, value: String },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Decode(e) => write!(f, "Could not load the image: {}", e),
            EditError::Encode(e) => write!(f, "Could not save the image: {}", e),
            EditError::Io(e) => write!(f, "I/O error: {}", e),
            EditError::OutOfRange { x, y, max_x, max_y } => write!(
                f,
                "Coordinates ({}, {}) out of range. Maximum: X={}, Y={}",
                x, y, max_x, max_y
            ),
            EditError::InvalidColor { r, g, b } => write!(
                f,
                "RGB values must be between 0 and 255 (got {}, {}, {})",
                r, g, b
            ),
            EditError::UnsupportedMode(mode) => {
                write!(f, "Unsupported selection mode: {}", mode)
            }
            EditError::NoImage => write!(f, "No image loaded"),
            EditError::Parse { field, value } => {
                write!(f, "Invalid {}: '{}' is not a whole number", field, value)
            }
        }
    }
}

impl std::error::Error for EditError {}

impl From<std::io::Error> for EditError {
    fn from(e: std::io::Error) -> Self {
        EditError::Io(e)
    }
}
