//! Shared constants for report composition
//!
//! Page geometry is expressed in page units (millimeters) with the origin at
//! the top-left corner of the page, y growing downwards. Source images are
//! sized in pixels and converted with [`PX_TO_UNITS`].

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Image scale ratio between pixel space and points
pub const IMAGE_SCALE_RATIO: f32 = 1.25;

/// Page units per pixel: 1 / (IMAGE_SCALE_RATIO * POINTS_PER_MM) = 25.4 / 90
pub const PX_TO_UNITS: f32 = 25.4 / 90.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// A4 portrait width in millimeters
pub const A4_WIDTH_MM: f32 = 210.0;

/// A4 portrait height in millimeters
pub const A4_HEIGHT_MM: f32 = 297.0;

// =============================================================================
// Gallery
// =============================================================================

/// Spacing between gallery images (page units)
pub const GALLERY_SPACING: f32 = 3.0;

/// Gallery block height for a single image
pub const GALLERY_HEIGHT_ONE: f32 = 150.0;

/// Gallery block height for two images side by side
pub const GALLERY_HEIGHT_TWO: f32 = 75.0;

/// Gallery block height for three images
pub const GALLERY_HEIGHT_THREE: f32 = 150.0;

/// Images are requested at this multiple of their slot's pixel size
pub const IMAGE_OVERSAMPLE: u32 = 2;

/// Upper bound for the configurable oversample factor
pub const MAX_IMAGE_OVERSAMPLE: u32 = 8;

// =============================================================================
// Pagination
// =============================================================================

/// Texts shorter than this (plain characters) are never split
pub const SINGLE_PAGE_BUDGET: usize = 1100;

/// Budget for the page holding the first paragraph
pub const FIRST_PAGE_BUDGET: usize = 1100;

/// Budget for every later page
pub const CONTINUATION_PAGE_BUDGET: usize = 1200;

// =============================================================================
// Team Cards
// =============================================================================

/// Column step between team member cards
pub const TEAM_COLUMN_STEP: f32 = 100.0;

/// Row step between rows of team member cards
pub const TEAM_ROW_STEP: f32 = 25.0;

/// Left edge of the first team card column
pub const TEAM_START_X: f32 = 30.0;

/// Vertical offset added for every team group
pub const TEAM_GROUP_OFFSET: f32 = 45.0;

/// Horizontal offset of the member text block from the card anchor
pub const TEAM_TITLE_SPACING: f32 = 14.0;

/// Vertical offset (upwards) of the member text block from the card anchor
pub const TEAM_DESCRIPTION_SPACING: f32 = 17.0;

/// Trailing correction applied after every team group
pub const TEAM_GROUP_TRAILING: f32 = -33.0;

/// Avatar offset from the card anchor (left, up)
pub const TEAM_AVATAR_OFFSET: (f32, f32) = (5.0, 10.0);

/// Avatar pixel size
pub const TEAM_AVATAR_PX: u32 = 50;

/// Members per team card row
pub const TEAM_COLUMNS: usize = 2;

// =============================================================================
// Text
// =============================================================================

/// Default body font size (points)
pub const BODY_FONT_SIZE: f32 = 12.0;

/// Footer font size (points)
pub const FOOTER_FONT_SIZE: f32 = 8.0;

/// Footer baseline distance from the page bottom (page units)
pub const FOOTER_OFFSET: f32 = 15.0;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.25;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
