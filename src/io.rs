//! Image file loading, saving, and native file dialogs.
//!
//! Decoding and encoding go through the `image` crate; the output format is
//! chosen by the file extension, with `.png` appended when the user supplies
//! none. Both directions are synchronous, blocking calls on the caller's
//! thread.

use std::path::{Path, PathBuf};

use image::RgbImage;
use rfd::FileDialog;

use crate::config::{DEFAULT_SAVE_EXTENSION, OPEN_EXTENSIONS, SAVE_EXTENSIONS};
use crate::error::EditError;

/// Open and decode a raster file into an RGB grid.
pub fn load_rgb(path: &Path) -> Result<RgbImage, EditError> {
    let img = image::open(path).map_err(|e| EditError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Encode the grid to `path`, appending the default extension when the path
/// has none. Returns the path actually written.
pub fn save_rgb(img: &RgbImage, path: &Path) -> Result<PathBuf, EditError> {
    let path = ensure_extension(path);
    img.save(&path).map_err(|e| EditError::Encode(e.to_string()))?;
    Ok(path)
}

/// Append the default save extension to an extension-less path.
pub fn ensure_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_SAVE_EXTENSION)
    }
}

/// Ask the user for an existing image file to open.
pub fn pick_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select an image")
        .add_filter("Images", OPEN_EXTENSIONS)
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .pick_file()
}

/// Ask the user where to save the current image.
pub fn pick_save_path() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Save image")
        .set_file_name(&format!("untitled.{}", DEFAULT_SAVE_EXTENSION))
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .add_filter("BMP", &["bmp"])
        .add_filter("All supported", SAVE_EXTENSIONS)
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extension_is_appended_only_when_missing() {
        assert_eq!(ensure_extension(Path::new("out")), PathBuf::from("out.png"));
        assert_eq!(ensure_extension(Path::new("out.jpg")), PathBuf::from("out.jpg"));
        assert_eq!(ensure_extension(Path::new("dir/out")), PathBuf::from("dir/out.png"));
    }

    #[test]
    fn missing_file_reports_decode_failure() {
        let err = load_rgb(Path::new("/nonexistent/image.png")).unwrap_err();
        assert!(matches!(err, EditError::Decode(_)));
    }
}
