//! The drawing surface.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use tracing::debug;

use crate::error::{CanvasError, CanvasResult};
use crate::strokes::{Point, StrokePath};

/// Default surface size, ten times the 28×28 input the classifier resizes to.
pub const DEFAULT_SIZE: u32 = 280;

/// Default stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 30.0;

/// Background (paper) luminance.
const BACKGROUND: u8 = 0xFF;

/// Ink luminance.
const INK: u8 = 0x00;

/// A grayscale raster the user sketches a digit on.
///
/// White background, black ink. The pixel buffer is only mutated through
/// gesture methods ([`draw_stroke`](Sketch::draw_stroke),
/// [`erase_stroke`](Sketch::erase_stroke), [`clear`](Sketch::clear));
/// [`export_png`](Sketch::export_png) takes a snapshot without touching it.
#[derive(Debug, Clone)]
pub struct Sketch {
    width: u32,
    height: u32,
    stroke_width: f32,
    pixels: Vec<u8>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl Sketch {
    /// Create a blank surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stroke_width: DEFAULT_STROKE_WIDTH,
            pixels: vec![BACKGROUND; (width as usize) * (height as usize)],
        }
    }

    /// Override the default stroke width.
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width.max(1.0);
        self
    }

    /// Load an existing PNG into a surface, preserving its dimensions.
    pub fn from_png_bytes(bytes: &[u8]) -> CanvasResult<Self> {
        let img = image::load_from_memory(bytes)?.to_luma8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            stroke_width: DEFAULT_STROKE_WIDTH,
            pixels: img.into_raw(),
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw a pen stroke through the given points.
    pub fn draw_stroke(&mut self, points: &[Point]) {
        self.paint(points, self.stroke_width, INK);
    }

    /// Erase along the given points.
    pub fn erase_stroke(&mut self, points: &[Point]) {
        self.paint(points, self.stroke_width, BACKGROUND);
    }

    /// Replay a recorded gesture onto the surface.
    pub fn apply(&mut self, stroke: &StrokePath) {
        let width = stroke.stroke_width.unwrap_or(self.stroke_width).max(1.0);
        let value = if stroke.draw_mode { INK } else { BACKGROUND };
        self.paint(&stroke.points, width, value);
    }

    /// Replay a whole strokes file in order.
    pub fn apply_all(&mut self, strokes: &[StrokePath]) {
        for stroke in strokes {
            self.apply(stroke);
        }
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    /// Check whether the surface holds no ink.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == BACKGROUND)
    }

    /// Encode the surface as PNG bytes.
    pub fn to_png_bytes(&self) -> CanvasResult<Vec<u8>> {
        let img = image::GrayImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                CanvasError::InvalidRaster(format!(
                    "buffer of {} bytes does not fit {}x{}",
                    self.pixels.len(),
                    self.width,
                    self.height
                ))
            })?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)?;

        debug!("Encoded {}x{} sketch ({} PNG bytes)", self.width, self.height, buf.len());
        Ok(buf)
    }

    /// Export the surface as a base64 PNG data URL.
    ///
    /// The `data:image/png;base64,` prefix is part of the payload contract:
    /// the classification worker strips everything up to the first comma
    /// before decoding.
    pub fn export_png(&self) -> CanvasResult<String> {
        let buf = self.to_png_bytes()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(&buf)))
    }

    /// Luminance at a pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Stamp discs of the given width along the polyline.
    fn paint(&mut self, points: &[Point], stroke_width: f32, value: u8) {
        let radius = stroke_width / 2.0;
        match points {
            [] => {}
            [single] => self.stamp(*single, radius, value),
            _ => {
                for segment in points.windows(2) {
                    self.stamp_segment(segment[0], segment[1], radius, value);
                }
            }
        }
    }

    /// Stamp discs along one segment at roughly one-pixel spacing.
    fn stamp_segment(&mut self, from: Point, to: Point, radius: f32, value: u8) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = length.ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(
                Point::new(from.x + dx * t, from.y + dy * t),
                radius,
                value,
            );
        }
    }

    /// Fill a disc centred on `center`. Off-surface portions are clipped.
    fn stamp(&mut self, center: Point, radius: f32, value: u8) {
        let r_sq = radius * radius;
        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0) as u32;

        if center.x + radius < 0.0 || center.y + radius < 0.0 {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels[(y * self.width + x) as usize] = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sketch_is_blank() {
        let sketch = Sketch::default();
        assert_eq!(sketch.width(), DEFAULT_SIZE);
        assert_eq!(sketch.height(), DEFAULT_SIZE);
        assert!(sketch.is_blank());
    }

    #[test]
    fn test_draw_stroke_leaves_ink() {
        let mut sketch = Sketch::default();
        sketch.draw_stroke(&[Point::new(100.0, 100.0), Point::new(150.0, 150.0)]);

        assert!(!sketch.is_blank());
        assert_eq!(sketch.pixel(100, 100), Some(0x00));
        assert_eq!(sketch.pixel(10, 10), Some(0xFF));
    }

    #[test]
    fn test_single_point_stamps_a_disc() {
        let mut sketch = Sketch::default();
        sketch.draw_stroke(&[Point::new(140.0, 140.0)]);

        assert_eq!(sketch.pixel(140, 140), Some(0x00));
        // Inside the default 15px radius.
        assert_eq!(sketch.pixel(150, 140), Some(0x00));
        // Outside it.
        assert_eq!(sketch.pixel(160, 140), Some(0xFF));
    }

    #[test]
    fn test_erase_removes_ink() {
        let mut sketch = Sketch::default();
        let line = [Point::new(100.0, 100.0), Point::new(180.0, 100.0)];
        sketch.draw_stroke(&line);
        sketch.erase_stroke(&line);

        assert!(sketch.is_blank());
    }

    #[test]
    fn test_clear_always_empties_the_surface() {
        let mut sketch = Sketch::default();
        sketch.draw_stroke(&[Point::new(50.0, 50.0), Point::new(200.0, 200.0)]);
        assert!(!sketch.is_blank());

        sketch.clear();
        assert!(sketch.is_blank());

        // Clearing a blank surface is a no-op.
        sketch.clear();
        assert!(sketch.is_blank());
    }

    #[test]
    fn test_strokes_off_surface_are_clipped() {
        let mut sketch = Sketch::new(50, 50);
        sketch.draw_stroke(&[Point::new(-30.0, -30.0), Point::new(80.0, 80.0)]);
        // No panic, and the on-surface diagonal got ink.
        assert_eq!(sketch.pixel(25, 25), Some(0x00));
    }

    #[test]
    fn test_export_has_data_url_prefix() {
        let sketch = Sketch::default();
        let payload = sketch.export_png().unwrap();
        assert!(payload.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_blank_surface_exports_as_is() {
        // An empty canvas is submitted unchanged; there is no blank check.
        let sketch = Sketch::default();
        let payload = sketch.export_png().unwrap();

        let encoded = payload.split_once(',').unwrap().1;
        let bytes = BASE64.decode(encoded).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert!(img.pixels().all(|p| p.0[0] == 0xFF));
    }

    #[test]
    fn test_export_roundtrips_ink() {
        let mut sketch = Sketch::default();
        sketch.draw_stroke(&[Point::new(140.0, 60.0), Point::new(140.0, 220.0)]);

        let payload = sketch.export_png().unwrap();
        let encoded = payload.split_once(',').unwrap().1;
        let bytes = BASE64.decode(encoded).unwrap();

        let reloaded = Sketch::from_png_bytes(&bytes).unwrap();
        assert_eq!(reloaded.width(), DEFAULT_SIZE);
        assert_eq!(reloaded.pixel(140, 140), Some(0x00));
        assert_eq!(reloaded.pixel(20, 20), Some(0xFF));
    }

    #[test]
    fn test_apply_respects_draw_mode_and_width() {
        let mut sketch = Sketch::default();
        let pen = StrokePath::pen(vec![Point::new(100.0, 100.0), Point::new(120.0, 100.0)]);
        sketch.apply(&pen);
        assert!(!sketch.is_blank());

        let mut eraser = StrokePath::eraser(vec![
            Point::new(100.0, 100.0),
            Point::new(120.0, 100.0),
        ]);
        eraser.stroke_width = Some(60.0);
        sketch.apply(&eraser);
        assert!(sketch.is_blank());
    }
}
