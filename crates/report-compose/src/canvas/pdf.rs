//! PDF canvas backed by lopdf
//!
//! Pages are collected as content-stream strings and turned into a document
//! on [`Canvas::finish`]. Page-unit coordinates (top-left origin) are
//! converted to PDF user space (points, bottom-left origin) as they are
//! written.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::collab::ResolvedImage;
use crate::constants::{BODY_FONT_SIZE, FOOTER_FONT_SIZE, FOOTER_OFFSET, mm_to_pt};
use crate::layout::Rect;
use crate::types::{PageKind, ReportError, Result, Rgba};

use super::text::{TextLine, block_height, layout_text};
use super::{Align, Canvas, DocumentInfo, Footer, TextCell};

/// Left and right margin of flowing text
const FLOW_MARGIN: f32 = 10.0;

/// Stroke width of rules, in page units
const LINE_WIDTH: f32 = 0.2;

#[derive(Default)]
struct PageState {
    kind: Option<PageKind>,
    content: String,
    footer: Option<Footer>,
    xobjects: Vec<(String, ObjectId)>,
    gstates: Vec<(String, f32)>,
}

/// Canvas that writes a PDF document
pub struct LopdfCanvas {
    doc: Document,
    page_width: f32,
    page_height: f32,
    pages: Vec<PageState>,
    font_regular: ObjectId,
    font_bold: ObjectId,
    image_cache: HashMap<(u32, u32, u64), ObjectId>,
    text_color: Rgba,
    fill_color: Rgba,
    font_size: f32,
    cursor_y: f32,
    info: DocumentInfo,
}

impl LopdfCanvas {
    /// Create an empty document with pages of the given size in page units
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let font_regular = doc.add_object(font_dictionary("Helvetica"));
        let font_bold = doc.add_object(font_dictionary("Helvetica-Bold"));

        Self {
            doc,
            page_width,
            page_height,
            pages: Vec::new(),
            font_regular,
            font_bold,
            image_cache: HashMap::new(),
            text_color: Rgba::rgb(0, 0, 0),
            fill_color: Rgba::rgb(255, 255, 255),
            font_size: BODY_FONT_SIZE,
            cursor_y: FLOW_MARGIN,
            info: DocumentInfo::default(),
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self) -> Option<&mut PageState> {
        self.pages.last_mut()
    }

    fn push_ops(&mut self, ops: &str) {
        match self.page_mut() {
            Some(page) => page.content.push_str(ops),
            None => log::warn!("Drawing before the first page was added; ignored"),
        }
    }

    /// Convert a top-left page-unit y coordinate to PDF user space
    fn pdf_y(&self, y: f32) -> f32 {
        mm_to_pt(self.page_height - y)
    }

    fn text_ops(
        &self,
        lines: &[TextLine],
        x: f32,
        y: f32,
        width: f32,
        align: Align,
        color: Rgba,
    ) -> String {
        let (r, g, b) = color.unit_components();
        let mut ops = String::new();
        let mut baseline = y;

        for line in lines {
            baseline += line.advance;
            let offset = match align {
                Align::Left => 0.0,
                Align::Center => (width - line.width()) / 2.0,
                Align::Right => width - line.width(),
            };
            let font = if line.bold { "F2" } else { "F1" };
            ops.push_str(&format!(
                "BT {} {} {} rg /{} {} Tf {} {} Td ({}) Tj ET\n",
                r,
                g,
                b,
                font,
                line.size,
                mm_to_pt(x + offset.max(0.0)),
                // baseline sits a fifth of the line above the bottom of the line box
                self.pdf_y(baseline - line.advance * 0.2),
                encode_text(&line.text)
            ));
        }

        ops
    }

    fn image_object(&mut self, image: &ResolvedImage) -> ObjectId {
        let key = (image.width, image.height, hash_pixels(&image.pixels));
        if let Some(id) = self.image_cache.get(&key) {
            return *id;
        }

        let dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(image.width as i64)),
            ("Height", Object::Integer(image.height as i64)),
            ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
        ]);
        let id = self.doc.add_object(Stream::new(dict, image.pixels.clone()));
        self.image_cache.insert(key, id);
        id
    }

    fn footer_ops(&self, footer: &Footer) -> String {
        let lines = layout_text(
            &footer.markup,
            self.page_width - 2.0 * FLOW_MARGIN,
            FOOTER_FONT_SIZE,
        );
        self.text_ops(
            &lines,
            FLOW_MARGIN,
            self.page_height - FOOTER_OFFSET,
            self.page_width - 2.0 * FLOW_MARGIN,
            Align::Center,
            footer.color.rgba(),
        )
    }
}

impl Canvas for LopdfCanvas {
    fn add_page(&mut self, kind: PageKind, footer: Option<Footer>) {
        self.pages.push(PageState {
            kind: Some(kind),
            footer,
            ..Default::default()
        });
        self.cursor_y = FLOW_MARGIN;
    }

    fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    fn set_text_color(&mut self, color: Rgba) {
        self.text_color = color;
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.fill_color;
        let (r, g, b) = color.unit_components();
        let Some(page) = self.page_mut() else {
            return;
        };

        let gs = if color.a < 1.0 {
            let name = format!("GS{}", page.gstates.len());
            page.gstates.push((name.clone(), color.a));
            format!("/{} gs ", name)
        } else {
            String::new()
        };

        let ops = format!(
            "q {}{} {} {} rg {} {} {} {} re f Q\n",
            gs,
            r,
            g,
            b,
            mm_to_pt(rect.x),
            self.pdf_y(rect.bottom()),
            mm_to_pt(rect.width),
            mm_to_pt(rect.height)
        );
        self.push_ops(&ops);
    }

    fn start_clip(&mut self, rect: Rect) {
        let ops = format!(
            "q {} {} {} {} re W n\n",
            mm_to_pt(rect.x),
            self.pdf_y(rect.bottom()),
            mm_to_pt(rect.width),
            mm_to_pt(rect.height)
        );
        self.push_ops(&ops);
    }

    fn end_clip(&mut self) {
        self.push_ops("Q\n");
    }

    fn draw_image(&mut self, image: &ResolvedImage, rect: Rect) {
        if self.pages.is_empty() {
            log::warn!("Image '{}' drawn before the first page; ignored", image.reference);
            return;
        }

        let id = self.image_object(image);
        let ops = {
            let Some(page) = self.pages.last_mut() else {
                return;
            };
            let name = format!("Im{}", page.xobjects.len());
            page.xobjects.push((name.clone(), id));
            format!(
                "q {} 0 0 {} {} {} cm /{} Do Q\n",
                mm_to_pt(rect.width),
                mm_to_pt(rect.height),
                mm_to_pt(rect.x),
                mm_to_pt(self.page_height - rect.bottom()),
                name
            )
        };
        self.push_ops(&ops);
    }

    fn write_cell(&mut self, cell: &TextCell<'_>) -> f32 {
        let width = if cell.width > 0.0 {
            cell.width
        } else {
            (self.page_width - FLOW_MARGIN - cell.x).max(1.0)
        };
        let lines = layout_text(cell.markup, width, self.font_size);
        let ops = self.text_ops(&lines, cell.x, cell.y, width, cell.align, self.text_color);
        self.push_ops(&ops);

        let bottom = cell.y + block_height(&lines);
        self.cursor_y = bottom;
        bottom
    }

    fn write_flow(&mut self, markup: &str, align: Align) {
        let width = self.page_width - 2.0 * FLOW_MARGIN;
        let lines = layout_text(markup, width, self.font_size);
        let ops = self.text_ops(&lines, FLOW_MARGIN, self.cursor_y, width, align, self.text_color);
        self.push_ops(&ops);
        self.cursor_y += block_height(&lines);
    }

    fn ln(&mut self, height: f32) {
        self.cursor_y += height;
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        let (r, g, b) = color.unit_components();
        let ops = format!(
            "q {} {} {} RG {} w {} {} m {} {} l S Q\n",
            r,
            g,
            b,
            mm_to_pt(LINE_WIDTH),
            mm_to_pt(from.0),
            self.pdf_y(from.1),
            mm_to_pt(to.0),
            self.pdf_y(to.1)
        );
        self.push_ops(&ops);
    }

    fn set_document_info(&mut self, info: &DocumentInfo) {
        self.info = info.clone();
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(ReportError::Config("Document has no pages".to_string()));
        }

        let width_pt = mm_to_pt(self.page_width);
        let height_pt = mm_to_pt(self.page_height);
        let pages_id = self.doc.new_object_id();
        let mut page_refs = Vec::with_capacity(self.pages.len());

        let pages = std::mem::take(&mut self.pages);
        for page in &pages {
            let mut content = page.content.clone();
            if let Some(footer) = &page.footer {
                content.push_str(&self.footer_ops(footer));
            }
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

            let fonts = Dictionary::from_iter(vec![
                ("F1", Object::Reference(self.font_regular)),
                ("F2", Object::Reference(self.font_bold)),
            ]);
            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(fonts));
            if !page.xobjects.is_empty() {
                let xobjects = page
                    .xobjects
                    .iter()
                    .map(|(name, id)| (name.clone(), Object::Reference(*id)))
                    .collect::<Dictionary>();
                resources.set("XObject", Object::Dictionary(xobjects));
            }
            if !page.gstates.is_empty() {
                let gstates = page
                    .gstates
                    .iter()
                    .map(|(name, alpha)| {
                        let gs = Dictionary::from_iter(vec![
                            ("Type", Object::Name(b"ExtGState".to_vec())),
                            ("ca", Object::Real(*alpha)),
                            ("CA", Object::Real(*alpha)),
                        ]);
                        (name.clone(), Object::Dictionary(gs))
                    })
                    .collect::<Dictionary>();
                resources.set("ExtGState", Object::Dictionary(gstates));
            }

            let page_dict = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(width_pt),
                        Object::Real(height_pt),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Dictionary(resources)),
            ]);
            page_refs.push(Object::Reference(self.doc.add_object(page_dict)));

            log::trace!("Wrote {:?} page", page.kind);
        }

        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Title", Object::string_literal(self.info.title.as_str())),
            ("Author", Object::string_literal(self.info.author.as_str())),
            ("Subject", Object::string_literal(self.info.subject.as_str())),
            ("Producer", Object::string_literal("report-compose")),
        ]));
        self.doc.trailer.set("Info", info_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Content hash of a raster; images are shared only when their pixels match
fn hash_pixels(pixels: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    pixels.hash(&mut hasher);
    hasher.finish()
}

fn font_dictionary(base_font: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

/// Escape text for a PDF literal string.
///
/// Latin-1 characters are written as octal escapes; anything outside Latin-1
/// becomes `?`.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}
