use report_compose::layout::*;

const ORIGIN: (f32, f32) = (10.0, 10.0);
const SPACING: f32 = 3.0;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn images(refs: &[&str]) -> Vec<String> {
    refs.iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_bucket_selection() {
    for (count, bucket) in [
        (0, GalleryBucket::One),
        (1, GalleryBucket::One),
        (2, GalleryBucket::Two),
        (3, GalleryBucket::Three),
        (12, GalleryBucket::Three),
    ] {
        let layout = gallery_layout(GalleryFamily::Project, count, ORIGIN, SPACING);
        assert_eq!(layout.bucket, bucket);
        assert_eq!(layout.slots.len(), bucket.slot_count());
    }
}

#[test]
fn test_first_slot_at_origin() {
    for family in [GalleryFamily::Company, GalleryFamily::Project] {
        for count in 1..=3 {
            let layout = gallery_layout(family, count, ORIGIN, SPACING);
            assert_eq!((layout.slots[0].rect.x, layout.slots[0].rect.y), ORIGIN);
        }
    }
}

#[test]
fn test_side_by_side_slots_share_top() {
    let layout = gallery_layout(GalleryFamily::Company, 2, ORIGIN, SPACING);
    let (left, right) = (layout.slots[0].rect, layout.slots[1].rect);
    assert_eq!(left.y, right.y);
    assert!(close(right.x, left.right() + SPACING));
}

#[test]
fn test_stacked_slot_sits_below_its_anchor() {
    let company = gallery_layout(GalleryFamily::Company, 3, ORIGIN, SPACING);
    assert!(close(company.slots[1].rect.y, company.slots[0].rect.bottom() + SPACING));
    assert_eq!(company.slots[1].rect.x, ORIGIN.0);

    let project = gallery_layout(GalleryFamily::Project, 3, ORIGIN, SPACING);
    assert!(close(project.slots[2].rect.y, project.slots[1].rect.bottom() + SPACING));
    assert_eq!(project.slots[2].rect.x, project.slots[1].rect.x);
}

#[test]
fn test_slot_pixel_sizes_convert_to_page_units() {
    let layout = gallery_layout(GalleryFamily::Company, 1, ORIGIN, SPACING);
    let slot = layout.slots[0];
    assert_eq!((slot.width_px, slot.height_px), (675, 520));
    assert!(close(slot.rect.width, to_page_units(675.0)));
    assert_eq!(slot.request_size(2), (1350, 1040));
}

#[test]
fn test_images_fill_slots_in_order() {
    let layout = gallery_layout(GalleryFamily::Project, 3, ORIGIN, SPACING);

    let placed = place_images(&layout, &images(&["a", "b"]));
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0].reference, "a");
    assert_eq!(placed[1].slot, layout.slots[1]);

    let placed = place_images(&layout, &images(&["a", "b", "c", "d"]));
    assert_eq!(placed.len(), 3);
}

#[test]
fn test_cursor_does_not_modify_images() {
    let set = images(&["a", "b", "c"]);
    let mut cursor = ImageCursor::new(&set);
    assert_eq!(cursor.next(), Some("a"));
    assert_eq!(cursor.remaining(), 2);
    assert_eq!(set.len(), 3);
}

#[test]
fn test_contain_fit_centers_tall_content() {
    let fit = contain_fit(200.0, 100.0, 50.0, 100.0);
    assert!(close(fit.scale, 1.0));
    assert!(close(fit.offset_x, 75.0));
    assert!(close(fit.offset_y, 0.0));
}
