//! In-memory sketch surface.
//!
//! [`Sketch`] is a grayscale raster the user draws digits on: black pen
//! strokes on a white background, erasable, clearable, and exportable as a
//! base64 PNG data URL, the payload shape the classification service
//! expects. The surface is mutable only through gesture methods; exporting
//! takes a snapshot and never consumes the drawing state.

pub mod error;
pub mod sketch;
pub mod strokes;

pub use error::{CanvasError, CanvasResult};
pub use sketch::Sketch;
pub use strokes::{Point, StrokePath, parse_strokes};
