//! Stroke path representation.
//!
//! A strokes file is a JSON array of `{ paths: [{x, y}, ...], strokeWidth,
//! drawMode }` objects, where `drawMode: false` marks an eraser gesture.
//! Stroke colour is ignored; the surface is binary ink.

use serde::{Deserialize, Serialize};

use crate::error::CanvasResult;

/// A point on the sketch surface, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One recorded gesture: a polyline of points plus pen/eraser mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePath {
    /// The sampled polyline of the gesture.
    #[serde(rename = "paths")]
    pub points: Vec<Point>,
    /// `true` for pen, `false` for eraser.
    #[serde(default = "default_draw_mode")]
    pub draw_mode: bool,
    /// Per-stroke width override; the surface default applies when absent.
    #[serde(default)]
    pub stroke_width: Option<f32>,
}

fn default_draw_mode() -> bool {
    true
}

impl StrokePath {
    /// Create a pen stroke through the given points.
    pub fn pen(points: Vec<Point>) -> Self {
        Self {
            points,
            draw_mode: true,
            stroke_width: None,
        }
    }

    /// Create an eraser stroke through the given points.
    pub fn eraser(points: Vec<Point>) -> Self {
        Self {
            points,
            draw_mode: false,
            stroke_width: None,
        }
    }
}

/// Parse a strokes file (a JSON array of [`StrokePath`]).
pub fn parse_strokes(bytes: &[u8]) -> CanvasResult<Vec<StrokePath>> {
    Ok(serde_json::from_slice(bytes)?)
}
