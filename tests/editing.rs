//! End-to-end library tests: load from disk, edit, undo, restore, save,
//! reload — exercising the session API the way the GUI shell does.

use image::{Rgb, RgbImage};
use pixedit::session::EditorSession;
use tempfile::TempDir;

fn checkerboard(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([200, 200, 200])
        } else {
            Rgb([40, 40, 40])
        }
    })
}

#[test]
fn load_edit_save_reload_round_trip() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("board.png");
    checkerboard(16, 12).save(&source).unwrap();

    let mut session = EditorSession::new();
    let info = session.load_path(&source).unwrap();
    assert!(info.contains("board.png"));
    assert!(info.contains("16 x 12"));
    assert!(info.contains("Total pixels: 192"));

    let out = session.fill_rectangle(2, 2, 5, 5, 255, 0, 255).unwrap();
    assert_eq!(out.changed, 16);

    let saved = session.save_path(&temp.path().join("edited.png")).unwrap();
    let written = image::open(&saved).unwrap().to_rgb8();
    assert_eq!(*written.get_pixel(3, 3), Rgb([255, 0, 255]));
    assert_eq!(*written.get_pixel(0, 0), Rgb([200, 200, 200]));
}

#[test]
fn bmp_save_preserves_exact_pixels() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("board.png");
    checkerboard(8, 8).save(&source).unwrap();

    let mut session = EditorSession::new();
    session.load_path(&source).unwrap();
    session.fill_circle(4, 4, 2, 1, 2, 3).unwrap();
    let saved = session.save_path(&temp.path().join("edited.bmp")).unwrap();

    let mut reloaded = EditorSession::new();
    reloaded.load_path(&saved).unwrap();
    assert_eq!(
        reloaded.buffer().unwrap().export().as_raw(),
        session.buffer().unwrap().export().as_raw()
    );
}

#[test]
fn undo_and_restore_against_a_file_backed_session() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("board.png");
    checkerboard(10, 10).save(&source).unwrap();

    let mut session = EditorSession::new();
    session.load_path(&source).unwrap();
    let pristine = session.buffer().unwrap().export().as_raw().clone();

    session.set_single_pixel(0, 0, 1, 1, 1).unwrap();
    session.fill_rectangle(0, 0, 9, 9, 2, 2, 2).unwrap();
    assert!(session.undo());
    assert_eq!(
        session.buffer().unwrap().export().get_pixel(0, 0),
        &Rgb([1, 1, 1]),
        "one undo reverts exactly the last operation"
    );

    session.restore_original().unwrap();
    assert_eq!(session.buffer().unwrap().export().as_raw(), &pristine);
    assert!(!session.undo(), "restore cleared the history");
}

#[test]
fn loading_a_second_file_drops_the_previous_history() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.png");
    let second = temp.path().join("b.png");
    checkerboard(6, 6).save(&first).unwrap();
    RgbImage::from_pixel(3, 3, Rgb([9, 9, 9])).save(&second).unwrap();

    let mut session = EditorSession::new();
    session.load_path(&first).unwrap();
    session.set_single_pixel(0, 0, 1, 1, 1).unwrap();
    assert_eq!(session.undo_depth(), 1);

    session.load_path(&second).unwrap();
    assert_eq!(session.dimensions(), Some((3, 3)));
    assert_eq!(session.undo_depth(), 0);
    assert!(!session.undo());
}
