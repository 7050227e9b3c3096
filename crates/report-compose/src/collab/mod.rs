//! Collaborators of the composition driver
//!
//! Composition never renders markup, fetches images, or reports progress on
//! its own. It goes through the traits in this module. Default
//! implementations are provided for offline builds.

mod images;
mod map;
mod progress;
mod templates;

pub use images::FsImageResolver;
pub use map::MarkerMapProvider;
pub use progress::LogProgress;
pub use templates::{BuiltinTemplates, Template};

use image::{Rgb, RgbImage};
use serde_json::Value;

use crate::types::{ReportError, Result};

/// Turns a named template and its bindings into markup
pub trait FragmentRenderer {
    /// Must be deterministic for equal inputs
    fn render(&self, template: Template, bindings: &Value) -> Result<String>;
}

/// Loads drawable images by reference
pub trait ImageResolver {
    /// Resolve `reference` cropped and scaled to exactly `width` x `height` pixels
    fn resolve(&self, reference: &str, width: u32, height: u32) -> Result<ResolvedImage>;

    /// Natural pixel size of `reference`
    fn dimensions(&self, reference: &str) -> Result<(u32, u32)>;
}

/// Produces a map raster with one marker per point
pub trait MapProvider {
    fn render_map(&self, points: &[GeoPoint], width: u32, height: u32) -> Result<ResolvedImage>;
}

/// Receives progress notifications. Delivery is fire-and-forget.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, label: &str, current: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(&str, usize, usize) + Send + Sync,
{
    fn notify(&self, label: &str, current: usize, total: usize) {
        self(label, current, total)
    }
}

/// A map marker position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Decoded image ready to be placed on a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Reference the image was resolved from
    pub reference: String,
    pub width: u32,
    pub height: u32,
    /// RGB8 pixels, row-major
    pub pixels: Vec<u8>,
}

/// Reference reported by substituted placeholder images
pub const PLACEHOLDER_REFERENCE: &str = "placeholder";

const PLACEHOLDER_FILL: Rgb<u8> = Rgb([221, 222, 224]);
const PLACEHOLDER_MARK: Rgb<u8> = Rgb([133, 134, 138]);

impl ResolvedImage {
    pub fn from_rgb(reference: impl Into<String>, image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            reference: reference.into(),
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    /// Neutral stand-in for missing content: a light panel with a diagonal cross
    pub fn placeholder(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let image = RgbImage::from_fn(width, height, |x, y| {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let on_cross = (u - v).abs() < 0.01 || (u + v - 1.0).abs() < 0.01;
            if on_cross { PLACEHOLDER_MARK } else { PLACEHOLDER_FILL }
        });
        Self::from_rgb(PLACEHOLDER_REFERENCE, image)
    }

    pub fn is_placeholder(&self) -> bool {
        self.reference == PLACEHOLDER_REFERENCE
    }

    /// Encode the pixels as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let image = RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| ReportError::Image {
                reference: self.reference.clone(),
                message: "pixel buffer does not match the image size".to_string(),
            })?;
        let mut bytes = Vec::new();
        image.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}
