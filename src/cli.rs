// ============================================================================
// PixEdit CLI — headless editing via command-line arguments
// ============================================================================
//
// Usage examples:
//   pixedit --input photo.png --fill-rect 10,10,40,30 --color 255,0,0 -o out.png
//   pixedit -i photo.png --set-pixel 5,5 --color 0,255,0
//   pixedit -i photo.png --fill-circle 20,20,8 --color 0,0,0 -o dot.bmp
//   pixedit -i photo.png --average 0,0,49,49
//   pixedit -i photo.jpg -o photo.png                 (format conversion only)
//
// No GUI is opened in CLI mode. All processing runs synchronously on the
// current thread.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::DEFAULT_SAVE_EXTENSION;
use crate::error::EditError;
use crate::parse::parse_int_list;
use crate::session::EditorSession;

/// PixEdit headless pixel editor.
///
/// Apply pixel and region edits to an image file without opening the GUI.
#[derive(Parser, Debug)]
#[command(
    name = "pixedit",
    about = "PixEdit headless pixel editor",
    long_about = "Load a raster image (PNG, JPEG, BMP, GIF), apply pixel and region\n\
                  edits, sample average colors, and save the result — no GUI required.\n\n\
                  Example:\n  \
                  pixedit --input photo.png --fill-rect 10,10,40,30 --color 255,0,0 -o out.png"
)]
pub struct CliArgs {
    /// Input image file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file path. Defaults to the input's directory with an `_out`
    /// stem when any edit was requested. The extension picks the format
    /// (png default).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Repaint one pixel at X,Y (requires --color).
    #[arg(long, value_name = "X,Y")]
    pub set_pixel: Option<String>,

    /// Fill the corner-inclusive rectangle X1,Y1,X2,Y2 (requires --color).
    #[arg(long, value_name = "X1,Y1,X2,Y2")]
    pub fill_rect: Option<String>,

    /// Fill the circle centered at CX,CY with the given radius (requires --color).
    #[arg(long, value_name = "CX,CY,RADIUS")]
    pub fill_circle: Option<String>,

    /// Color for the edit flags, each channel 0-255.
    #[arg(short, long, value_name = "R,G,B")]
    pub color: Option<String>,

    /// Print the average color of the rectangle X1,Y1,X2,Y2.
    #[arg(long, value_name = "X1,Y1,X2,Y2")]
    pub average: Option<String>,

    /// Print per-operation detail.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Returns `true` when any CLI-mode flag is present in the real process
/// arguments. Used by `main()` to route before creating an eframe window.
pub fn is_cli_mode() -> bool {
    std::env::args().any(|a| a == "--input" || a == "-i")
}

/// Run all CLI processing. Returns `true` when everything succeeded.
pub fn run(args: CliArgs) -> bool {
    match run_inner(&args) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("error: {}", e);
            false
        }
    }
}

fn run_inner(args: &CliArgs) -> Result<(), EditError> {
    let mut session = EditorSession::new();
    let info = session.load_path(&args.input)?;
    if args.verbose {
        println!("{}", info);
    }

    let color = match &args.color {
        Some(text) => Some(parse_int_list("color", text, 3)?),
        None => None,
    };
    let mut edited = false;

    if let Some(spec) = &args.set_pixel {
        let xy = parse_int_list("set-pixel", spec, 2)?;
        let [r, g, b] = require_color(&color, "--set-pixel")?;
        let out = session.set_single_pixel(xy[0], xy[1], r, g, b)?;
        edited = true;
        if args.verbose {
            println!("{}", out.message);
        }
    }

    if let Some(spec) = &args.fill_rect {
        let c = parse_int_list("fill-rect", spec, 4)?;
        let [r, g, b] = require_color(&color, "--fill-rect")?;
        let out = session.fill_rectangle(c[0], c[1], c[2], c[3], r, g, b)?;
        edited = true;
        if args.verbose {
            println!("{}", out.message);
        }
    }

    if let Some(spec) = &args.fill_circle {
        let c = parse_int_list("fill-circle", spec, 3)?;
        let [r, g, b] = require_color(&color, "--fill-circle")?;
        let out = session.fill_circle(c[0], c[1], c[2], r, g, b)?;
        edited = true;
        if args.verbose {
            println!("{}", out.message);
        }
    }

    if let Some(spec) = &args.average {
        let c = parse_int_list("average", spec, 4)?;
        match session.average_color(c[0], c[1], c[2], c[3])? {
            Some(avg) => println!("average: RGB({}, {}, {})", avg.0[0], avg.0[1], avg.0[2]),
            None => println!("average: not available (empty region)"),
        }
    }

    if edited || args.output.is_some() {
        let output = match &args.output {
            Some(p) => p.clone(),
            None => default_output_path(&args.input),
        };
        let written = session.save_path(&output)?;
        println!("saved: {}", written.display());
    }

    Ok(())
}

/// The edit flags share one `--color`; using any of them without it is a
/// usage error rather than a silent default.
fn require_color(color: &Option<Vec<i64>>, flag: &'static str) -> Result<[i64; 3], EditError> {
    match color {
        Some(c) => Ok([c[0], c[1], c[2]]),
        None => Err(EditError::Parse {
            field: "color",
            value: format!("{} requires --color R,G,B", flag),
        }),
    }
}

/// Output path when `--output` is omitted: next to the input, `_out` stem,
/// default extension.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}_out.{}", stem, DEFAULT_SAVE_EXTENSION))
}
