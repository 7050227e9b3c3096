//! Offline marker map
//!
//! Draws an equirectangular world raster: a flat background, a graticule
//! every 30 degrees, and one square marker per point.

use image::{Rgb, RgbImage};

use crate::types::{ReportError, Result};

use super::{GeoPoint, MapProvider, ResolvedImage};

const BACKGROUND: Rgb<u8> = Rgb([232, 236, 240]);
const GRATICULE: Rgb<u8> = Rgb([200, 206, 214]);
const MARKER: Rgb<u8> = Rgb([43, 46, 52]);

/// Reference reported for generated maps
pub const MAP_REFERENCE: &str = "map";

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerMapProvider;

impl MarkerMapProvider {
    fn project(point: GeoPoint, width: u32, height: u32) -> (u32, u32) {
        let x = (point.lng + 180.0) / 360.0 * width as f64;
        let y = (90.0 - point.lat) / 180.0 * height as f64;
        (
            (x as u32).min(width - 1),
            (y as u32).min(height - 1),
        )
    }
}

impl MapProvider for MarkerMapProvider {
    fn render_map(&self, points: &[GeoPoint], width: u32, height: u32) -> Result<ResolvedImage> {
        if width == 0 || height == 0 {
            return Err(ReportError::Map(format!(
                "Map size must be positive, got {}x{}",
                width, height
            )));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !(-90.0..=90.0).contains(&p.lat) || !(-180.0..=180.0).contains(&p.lng))
        {
            return Err(ReportError::Map(format!(
                "Coordinates out of range: {}, {}",
                bad.lat, bad.lng
            )));
        }

        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

        for step in 1..12 {
            let x = step * width / 12;
            for y in 0..height {
                image.put_pixel(x.min(width - 1), y, GRATICULE);
            }
        }
        for step in 1..6 {
            let y = step * height / 6;
            for x in 0..width {
                image.put_pixel(x, y.min(height - 1), GRATICULE);
            }
        }

        let half = (width.min(height) / 60).max(2);
        for point in points {
            let (cx, cy) = Self::project(*point, width, height);
            let x0 = cx.saturating_sub(half);
            let y0 = cy.saturating_sub(half);
            let x1 = (cx + half).min(width - 1);
            let y1 = (cy + half).min(height - 1);
            for y in y0..=y1 {
                for x in x0..=x1 {
                    image.put_pixel(x, y, MARKER);
                }
            }
        }

        log::debug!("Rendered {}x{} map with {} markers", width, height, points.len());
        Ok(ResolvedImage::from_rgb(MAP_REFERENCE, image))
    }
}
