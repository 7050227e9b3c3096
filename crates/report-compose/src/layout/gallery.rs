//! Gallery layout selection
//!
//! A gallery is the block of one to three images at the top of cover,
//! company, section and project pages. Slot sizes come from a fixed table in
//! pixel space keyed by family and image-count bucket. Every slot after the
//! first is anchored to an earlier slot, so positions are computed by walking
//! the table in order.

use crate::constants::{GALLERY_HEIGHT_ONE, GALLERY_HEIGHT_THREE, GALLERY_HEIGHT_TWO};

use super::units::px;
use super::{GalleryBucket, GalleryFamily, GalleryLayout, GallerySlot, PlacedImage, Rect};

// =============================================================================
// Slot Table
// =============================================================================

/// Where a slot sits relative to the gallery origin or an earlier slot
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Origin,
    RightOf(usize),
    Below(usize),
}

#[derive(Debug, Clone, Copy)]
struct SlotSpec {
    width_px: u32,
    height_px: u32,
    anchor: Anchor,
}

const fn slot(width_px: u32, height_px: u32, anchor: Anchor) -> SlotSpec {
    SlotSpec {
        width_px,
        height_px,
        anchor,
    }
}

const FULL: SlotSpec = slot(675, 520, Anchor::Origin);

const COMPANY_ONE: [SlotSpec; 1] = [FULL];
const COMPANY_TWO: [SlotSpec; 2] = [
    slot(387, 255, Anchor::Origin),
    slot(280, 255, Anchor::RightOf(0)),
];
const COMPANY_THREE: [SlotSpec; 3] = [
    slot(675, 255, Anchor::Origin),
    slot(390, 255, Anchor::Below(0)),
    slot(275, 255, Anchor::RightOf(1)),
];

const PROJECT_ONE: [SlotSpec; 1] = [FULL];
const PROJECT_TWO: [SlotSpec; 2] = [
    slot(387, 255, Anchor::Origin),
    slot(275, 255, Anchor::RightOf(0)),
];
const PROJECT_THREE: [SlotSpec; 3] = [
    slot(390, 520, Anchor::Origin),
    slot(275, 255, Anchor::RightOf(0)),
    slot(275, 255, Anchor::Below(1)),
];

fn slot_table(family: GalleryFamily, bucket: GalleryBucket) -> &'static [SlotSpec] {
    match (family, bucket) {
        (GalleryFamily::Company, GalleryBucket::One) => &COMPANY_ONE,
        (GalleryFamily::Company, GalleryBucket::Two) => &COMPANY_TWO,
        (GalleryFamily::Company, GalleryBucket::Three) => &COMPANY_THREE,
        (GalleryFamily::Project, GalleryBucket::One) => &PROJECT_ONE,
        (GalleryFamily::Project, GalleryBucket::Two) => &PROJECT_TWO,
        (GalleryFamily::Project, GalleryBucket::Three) => &PROJECT_THREE,
    }
}

/// Height of the gallery block for a bucket
pub fn gallery_height(bucket: GalleryBucket) -> f32 {
    match bucket {
        GalleryBucket::One => GALLERY_HEIGHT_ONE,
        GalleryBucket::Two => GALLERY_HEIGHT_TWO,
        GalleryBucket::Three => GALLERY_HEIGHT_THREE,
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Compute the slots for `count` images of a family.
///
/// `origin` is the top-left corner of the gallery in page units and
/// `spacing` the gap between adjacent slots.
pub fn gallery_layout(
    family: GalleryFamily,
    count: usize,
    origin: (f32, f32),
    spacing: f32,
) -> GalleryLayout {
    let bucket = GalleryBucket::from_count(count);
    let mut slots: Vec<GallerySlot> = Vec::with_capacity(bucket.slot_count());

    for spec in slot_table(family, bucket) {
        let width = px(spec.width_px);
        let height = px(spec.height_px);
        let (x, y) = match spec.anchor {
            Anchor::Origin => origin,
            Anchor::RightOf(i) => (slots[i].rect.right() + spacing, slots[i].rect.y),
            Anchor::Below(i) => (slots[i].rect.x, slots[i].rect.bottom() + spacing),
        };
        slots.push(GallerySlot {
            rect: Rect::new(x, y, width, height),
            width_px: spec.width_px,
            height_px: spec.height_px,
        });
    }

    GalleryLayout {
        family,
        bucket,
        slots,
        height: gallery_height(bucket),
    }
}

/// Read-only cursor over an image set
///
/// Images are handed out front to back; the underlying sequence is never
/// modified.
#[derive(Debug, Clone)]
pub struct ImageCursor<'a> {
    images: &'a [String],
    position: usize,
}

impl<'a> ImageCursor<'a> {
    pub fn new(images: &'a [String]) -> Self {
        Self {
            images,
            position: 0,
        }
    }

    /// Number of images not yet handed out
    pub fn remaining(&self) -> usize {
        self.images.len() - self.position
    }
}

impl<'a> Iterator for ImageCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.images.get(self.position)?;
        self.position += 1;
        Some(image.as_str())
    }
}

/// Assign images to the layout's slots in order.
///
/// Slots beyond the last image are left out; images beyond the last slot are
/// ignored.
pub fn place_images(layout: &GalleryLayout, images: &[String]) -> Vec<PlacedImage> {
    layout
        .slots
        .iter()
        .zip(ImageCursor::new(images))
        .map(|(slot, reference)| PlacedImage {
            slot: *slot,
            reference: reference.to_string(),
        })
        .collect()
}

impl GallerySlot {
    /// Pixel size to request from the image resolver
    pub fn request_size(&self, oversample: u32) -> (u32, u32) {
        (self.width_px * oversample, self.height_px * oversample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: (f32, f32) = (10.0, 10.0);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_bucket_heights() {
        assert_eq!(gallery_layout(GalleryFamily::Company, 1, ORIGIN, 3.0).height, 150.0);
        assert_eq!(gallery_layout(GalleryFamily::Company, 2, ORIGIN, 3.0).height, 75.0);
        assert_eq!(gallery_layout(GalleryFamily::Project, 7, ORIGIN, 3.0).height, 150.0);
    }

    #[test]
    fn test_zero_count_uses_single_slot() {
        let layout = gallery_layout(GalleryFamily::Project, 0, ORIGIN, 3.0);
        assert_eq!(layout.bucket, GalleryBucket::One);
        assert_eq!(layout.slots.len(), 1);
    }

    #[test]
    fn test_small_slot_widths_differ_between_families() {
        let company = gallery_layout(GalleryFamily::Company, 2, ORIGIN, 3.0);
        let project = gallery_layout(GalleryFamily::Project, 2, ORIGIN, 3.0);
        assert_eq!(company.slots[1].width_px, 280);
        assert_eq!(project.slots[1].width_px, 275);
        assert!(close(company.slots[1].rect.x, 10.0 + px(387) + 3.0));
    }

    #[test]
    fn test_company_three_stacks_below_lead() {
        let layout = gallery_layout(GalleryFamily::Company, 3, ORIGIN, 3.0);
        let [lead, second, third] = [layout.slots[0], layout.slots[1], layout.slots[2]];
        assert!(close(second.rect.x, 10.0));
        assert!(close(second.rect.y, 10.0 + px(255) + 3.0));
        assert!(close(third.rect.x, 10.0 + px(390) + 3.0));
        assert!(close(third.rect.y, second.rect.y));
        assert!(close(lead.rect.width, px(675)));
    }

    #[test]
    fn test_project_three_uses_portrait_lead() {
        let layout = gallery_layout(GalleryFamily::Project, 3, ORIGIN, 3.0);
        let lead = layout.slots[0];
        assert!(lead.rect.height > lead.rect.width);
        assert!(close(layout.slots[1].rect.y, 10.0));
        assert!(close(layout.slots[2].rect.x, layout.slots[1].rect.x));
        assert!(close(layout.slots[2].rect.y, 10.0 + px(255) + 3.0));
    }

    #[test]
    fn test_place_images_in_order() {
        let layout = gallery_layout(GalleryFamily::Company, 3, ORIGIN, 3.0);
        let images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let placed = place_images(&layout, &images);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].reference, "a.jpg");
        assert_eq!(placed[1].slot, layout.slots[1]);
        // the source sequence is untouched
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn test_cursor_remaining() {
        let images = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut cursor = ImageCursor::new(&images);
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.by_ref().count(), 2);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_request_size_oversamples() {
        let layout = gallery_layout(GalleryFamily::Project, 1, ORIGIN, 3.0);
        assert_eq!(layout.slots[0].request_size(2), (1350, 1040));
    }
}
