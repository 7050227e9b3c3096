//! Pixel to page-unit conversion and contain-fitting

use crate::constants::PX_TO_UNITS;

use super::ContainFit;

/// Convert a pixel length to page units.
#[inline]
pub fn to_page_units(px: f32) -> f32 {
    px * PX_TO_UNITS
}

/// Convert a pixel length given as an integer to page units.
#[inline]
pub fn px(px: u32) -> f32 {
    to_page_units(px as f32)
}

/// Scale content to fit fully inside a box, centered on both axes.
///
/// Degenerate content (zero or negative size) is not scaled and is centered
/// as a point.
pub fn contain_fit(
    box_width: f32,
    box_height: f32,
    content_width: f32,
    content_height: f32,
) -> ContainFit {
    let scale = if content_width > 0.0 && content_height > 0.0 {
        (box_width / content_width).min(box_height / content_height)
    } else {
        0.0
    };

    let width = content_width.max(0.0) * scale;
    let height = content_height.max(0.0) * scale;

    ContainFit {
        scale,
        width,
        height,
        offset_x: (box_width - width) / 2.0,
        offset_y: (box_height - height) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_page_units() {
        assert!((to_page_units(90.0) - 25.4).abs() < 1e-4);
        // Full-width gallery image spans the A4 content width
        assert!((px(675) - 190.5).abs() < 1e-3);
        assert_eq!(to_page_units(0.0), 0.0);
    }

    #[test]
    fn test_contain_fit_wide_content() {
        let fit = contain_fit(200.0, 100.0, 400.0, 100.0);
        assert!((fit.scale - 0.5).abs() < 1e-6);
        assert!((fit.width - 200.0).abs() < 1e-4);
        assert!((fit.height - 50.0).abs() < 1e-4);
        assert!(fit.offset_x.abs() < 1e-4);
        assert!((fit.offset_y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_contain_fit_upscales_small_content() {
        let fit = contain_fit(210.0, 297.0, 21.0, 21.0);
        assert!((fit.scale - 10.0).abs() < 1e-4);
        assert!((fit.offset_y - 43.5).abs() < 1e-3);
    }

    #[test]
    fn test_contain_fit_degenerate_content() {
        let fit = contain_fit(100.0, 50.0, 0.0, 10.0);
        assert_eq!(fit.scale, 0.0);
        assert_eq!(fit.offset_x, 50.0);
        assert_eq!(fit.offset_y, 25.0);
    }
}
