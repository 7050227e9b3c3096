use lopdf::Document;
use report_compose::canvas::{Align, Canvas, DocumentInfo, Footer, LopdfCanvas, TextCell};
use report_compose::collab::{
    BuiltinTemplates, FsImageResolver, LogProgress, MarkerMapProvider, ResolvedImage,
};
use report_compose::layout::Rect;
use report_compose::*;

fn two_page_document() -> Vec<u8> {
    let mut canvas = LopdfCanvas::new(210.0, 297.0);
    canvas.set_document_info(&DocumentInfo {
        title: "Portfolio".to_string(),
        author: "Studio North".to_string(),
        subject: "Portfolio".to_string(),
    });

    canvas.add_page(PageKind::Cover, None);
    canvas.set_fill_color(Rgba::parse("rgba(10, 20, 30, 0.5)").unwrap());
    canvas.fill_rect(Rect::new(0.0, 0.0, 210.0, 297.0));
    canvas.draw_image(
        &ResolvedImage::placeholder(40, 30),
        Rect::new(0.0, 0.0, 100.0, 75.0),
    );

    canvas.add_page(
        PageKind::Company,
        Some(Footer {
            markup: "<p>Studio North | hello@studio.example</p>".to_string(),
            color: NamedColor::Gray,
        }),
    );
    canvas.start_clip(Rect::new(10.0, 10.0, 50.0, 50.0));
    canvas.draw_image(
        &ResolvedImage::placeholder(40, 30),
        Rect::new(10.0, 10.0, 50.0, 50.0),
    );
    canvas.end_clip();
    let header = "<h1>Studio North</h1><p>Café</p>";
    let bottom = canvas.write_cell(&TextCell::new(header, 10.0, 150.0));
    assert!(bottom > 150.0);
    canvas.write_flow("<h2>Team</h2>", Align::Center);
    canvas.ln(4.0);
    canvas.line((10.0, 176.0), (200.0, 176.0), NamedColor::Gray.rgba());

    canvas.finish().unwrap()
}

#[test]
fn test_document_is_valid_pdf() {
    let bytes = two_page_document();
    assert!(bytes.starts_with(b"%PDF-1.7"));

    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_document_info_is_written() {
    let doc = Document::load_mem(&two_page_document()).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    assert_eq!(
        info.get(b"Author").unwrap().as_str().unwrap(),
        b"Studio North"
    );
}

#[test]
fn test_identical_images_share_one_object() {
    let doc = Document::load_mem(&two_page_document()).unwrap();
    let images = doc
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| {
            s.dict.get(b"Subtype").and_then(|t| t.as_name()).ok() == Some(b"Image".as_slice())
        })
        .count();
    assert_eq!(images, 1);
}

#[test]
fn test_each_map_page_gets_its_own_raster() {
    let projects: Vec<Project> = (1..=10)
        .map(|id| Project {
            id,
            name: format!("P{}", id),
            latitude: Some(-40.0 + 8.0 * id as f64),
            longitude: Some(-150.0 + 25.0 * id as f64),
            ..Default::default()
        })
        .collect();
    let spec = ReportSpec {
        title: "Portfolio".to_string(),
        add_map: true,
        projects,
        selected_projects: (1..=10).collect(),
        ..Default::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let images = FsImageResolver::new(dir.path());
    let collab = Collaborators {
        renderer: &BuiltinTemplates,
        images: &images,
        maps: &MarkerMapProvider,
        progress: &LogProgress,
    };
    let (pages, bytes) = build_document(&spec, &ReportOptions::default(), collab).unwrap();

    let map_pages: Vec<u32> = pages
        .pages()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PageKind::Map)
        .map(|(i, _)| i as u32 + 1)
        .collect();
    assert_eq!(map_pages.len(), 2);

    let doc = Document::load_mem(&bytes).unwrap();
    let page_ids = doc.get_pages();
    let rasters: Vec<_> = map_pages
        .iter()
        .map(|number| {
            let page = doc.get_dictionary(page_ids[number]).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            xobjects.get(b"Im0").unwrap().as_reference().unwrap()
        })
        .collect();
    assert_ne!(rasters[0], rasters[1]);
}

#[test]
fn test_empty_document_is_rejected() {
    let mut canvas = LopdfCanvas::new(210.0, 297.0);
    assert!(matches!(canvas.finish(), Err(ReportError::Config(_))));
}
