//! Layout data types for composition
//!
//! These types carry the geometry computed by the gallery selector and the
//! grid walker before anything is drawn on the canvas.

/// A rectangular area in page units
///
/// Unlike PDF user space, the origin is the top-left corner of the page and
/// `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Which slot table a gallery uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryFamily {
    /// Cover, company and section pages: wide landscape lead image
    Company,
    /// Project pages: tall portrait lead image when three images are shown
    Project,
}

/// Image-count bucket of the gallery table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryBucket {
    One,
    Two,
    Three,
}

impl GalleryBucket {
    /// Clamp an image count to its bucket. Zero is treated as one.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 | 1 => GalleryBucket::One,
            2 => GalleryBucket::Two,
            _ => GalleryBucket::Three,
        }
    }

    pub fn slot_count(self) -> usize {
        match self {
            GalleryBucket::One => 1,
            GalleryBucket::Two => 2,
            GalleryBucket::Three => 3,
        }
    }
}

/// A gallery slot placed on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GallerySlot {
    /// Position and size in page units
    pub rect: Rect,
    /// Slot width in pixel space
    pub width_px: u32,
    /// Slot height in pixel space
    pub height_px: u32,
}

/// Result of a gallery lookup
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryLayout {
    pub family: GalleryFamily,
    pub bucket: GalleryBucket,
    /// Slots in fill order
    pub slots: Vec<GallerySlot>,
    /// Height of the gallery block; text starts below it
    pub height: f32,
}

/// An image reference assigned to a gallery slot
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub slot: GallerySlot,
    pub reference: String,
}

/// Result of fitting content inside a box without cropping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainFit {
    pub scale: f32,
    /// Scaled content width
    pub width: f32,
    /// Scaled content height
    pub height: f32,
    /// Left offset that centers the content in the box
    pub offset_x: f32,
    /// Top offset that centers the content in the box
    pub offset_y: f32,
}
