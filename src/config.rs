//! Application-wide constants.

/// Side length of the square canvas area, in display pixels. Loaded images
/// are scaled proportionally to fit inside this extent.
pub const CANVAS_EXTENT: u32 = 400;

/// Maximum number of undo snapshots kept in memory.
pub const HISTORY_CAPACITY: usize = 10;

/// Extension appended to a save path when the user supplies none.
pub const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Raster formats accepted by the open dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Raster formats offered by the save dialog.
pub const SAVE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Window title for the GUI shell.
pub const APP_TITLE: &str = "PixEdit";
