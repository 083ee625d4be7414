//! PixEdit — a small raster image editor for inspecting and repainting
//! individual pixels, with region fills, average-color sampling, a bounded
//! undo history, and restore-to-original.
//!
//! The editing core ([`session::EditorSession`] and everything below it) is
//! independent of any display surface; the eframe GUI ([`app`]) and the
//! headless CLI ([`cli`]) are thin shells over it.

pub mod app;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod io;
pub mod logger;
pub mod mapping;
pub mod parse;
pub mod region;
pub mod session;
