//! Canvas that records calls instead of drawing

use std::fmt::Write as _;

use crate::collab::ResolvedImage;
use crate::constants::BODY_FONT_SIZE;
use crate::layout::Rect;
use crate::types::{PageKind, Result, Rgba};

use super::text::{block_height, layout_text};
use super::{Align, Canvas, DocumentInfo, Footer, TextCell};

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    AddPage {
        kind: PageKind,
        footer: Option<Footer>,
    },
    TextColor(Rgba),
    FillColor(Rgba),
    FontSize(f32),
    FillRect(Rect),
    StartClip(Rect),
    EndClip,
    Image {
        reference: String,
        rect: Rect,
    },
    Cell {
        markup: String,
        x: f32,
        y: f32,
        width: f32,
        align: Align,
    },
    Flow {
        markup: String,
        align: Align,
    },
    Ln(f32),
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
    },
    DocumentInfo(DocumentInfo),
}

/// Canvas that keeps a log of every call
///
/// Text heights follow the same layout rules as the PDF canvas, so flow
/// positions match a real build.
pub struct RecordingCanvas {
    page_width: f32,
    page_height: f32,
    font_size: f32,
    cursor_y: f32,
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            font_size: BODY_FONT_SIZE,
            cursor_y: 0.0,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Kinds of the pages added, in order
    pub fn page_kinds(&self) -> Vec<PageKind> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::AddPage { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Calls made on page `index`, excluding the page start itself
    pub fn page_ops(&self, index: usize) -> &[CanvasOp] {
        let starts: Vec<usize> = self
            .ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, CanvasOp::AddPage { .. }))
            .map(|(i, _)| i)
            .collect();

        match starts.get(index) {
            Some(&start) => {
                let end = starts.get(index + 1).copied().unwrap_or(self.ops.len());
                &self.ops[start + 1..end]
            }
            None => &[],
        }
    }

    /// Image references drawn on page `index`
    pub fn page_images(&self, index: usize) -> Vec<&str> {
        self.page_ops(index)
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Image { reference, .. } => Some(reference.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Footer of page `index`
    pub fn page_footer(&self, index: usize) -> Option<&Footer> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::AddPage { footer, .. } => Some(footer.as_ref()),
                _ => None,
            })
            .nth(index)
            .flatten()
    }

    fn text_width(&self, x: f32, width: f32) -> f32 {
        if width > 0.0 {
            width
        } else {
            (self.page_width - 10.0 - x).max(1.0)
        }
    }
}

impl Canvas for RecordingCanvas {
    fn add_page(&mut self, kind: PageKind, footer: Option<Footer>) {
        self.cursor_y = 10.0;
        self.ops.push(CanvasOp::AddPage { kind, footer });
    }

    fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    fn set_text_color(&mut self, color: Rgba) {
        self.ops.push(CanvasOp::TextColor(color));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.ops.push(CanvasOp::FillColor(color));
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.ops.push(CanvasOp::FontSize(size));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(CanvasOp::FillRect(rect));
    }

    fn start_clip(&mut self, rect: Rect) {
        self.ops.push(CanvasOp::StartClip(rect));
    }

    fn end_clip(&mut self) {
        self.ops.push(CanvasOp::EndClip);
    }

    fn draw_image(&mut self, image: &ResolvedImage, rect: Rect) {
        self.ops.push(CanvasOp::Image {
            reference: image.reference.clone(),
            rect,
        });
    }

    fn write_cell(&mut self, cell: &TextCell<'_>) -> f32 {
        let width = self.text_width(cell.x, cell.width);
        let height = block_height(&layout_text(cell.markup, width, self.font_size));
        self.ops.push(CanvasOp::Cell {
            markup: cell.markup.to_string(),
            x: cell.x,
            y: cell.y,
            width: cell.width,
            align: cell.align,
        });
        self.cursor_y = cell.y + height;
        self.cursor_y
    }

    fn write_flow(&mut self, markup: &str, align: Align) {
        let width = self.page_width - 20.0;
        self.cursor_y += block_height(&layout_text(markup, width, self.font_size));
        self.ops.push(CanvasOp::Flow {
            markup: markup.to_string(),
            align,
        });
    }

    fn ln(&mut self, height: f32) {
        self.cursor_y += height;
        self.ops.push(CanvasOp::Ln(height));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        self.ops.push(CanvasOp::Line { from, to, color });
    }

    fn set_document_info(&mut self, info: &DocumentInfo) {
        self.ops.push(CanvasOp::DocumentInfo(info.clone()));
    }

    /// Render the recorded calls as a plain-text outline, one page per block
    fn finish(&mut self) -> Result<Vec<u8>> {
        let mut out = String::new();
        let mut page = 0;

        for op in &self.ops {
            match op {
                CanvasOp::AddPage { kind, footer } => {
                    page += 1;
                    let _ = writeln!(out, "page {} [{}]", page, kind);
                    if let Some(footer) = footer {
                        let _ = writeln!(out, "  footer {:?}: {}", footer.color, footer.markup);
                    }
                }
                CanvasOp::Image { reference, rect } => {
                    let _ = writeln!(
                        out,
                        "  image {} at ({:.1}, {:.1}) {:.1}x{:.1}",
                        reference, rect.x, rect.y, rect.width, rect.height
                    );
                }
                CanvasOp::Cell { markup, x, y, .. } => {
                    let _ = writeln!(out, "  text at ({:.1}, {:.1}): {}", x, y, summary(markup));
                }
                CanvasOp::Flow { markup, .. } => {
                    let _ = writeln!(out, "  text: {}", summary(markup));
                }
                CanvasOp::Line { from, to, .. } => {
                    let _ = writeln!(
                        out,
                        "  rule ({:.1}, {:.1}) - ({:.1}, {:.1})",
                        from.0, from.1, to.0, to.1
                    );
                }
                _ => {}
            }
        }

        Ok(out.into_bytes())
    }
}

fn summary(markup: &str) -> String {
    let text = crate::markup::strip_tags(markup);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() > 60 {
        let cut: String = text.chars().take(57).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedColor;

    #[test]
    fn test_page_ops_are_split_by_page() {
        let mut canvas = RecordingCanvas::new(210.0, 297.0);
        canvas.add_page(PageKind::Cover, None);
        canvas.fill_rect(Rect::new(0.0, 0.0, 210.0, 297.0));
        canvas.add_page(
            PageKind::End,
            Some(Footer {
                markup: "bye".to_string(),
                color: NamedColor::White,
            }),
        );
        canvas.ln(5.0);
        canvas.ln(3.0);

        assert_eq!(canvas.page_kinds(), vec![PageKind::Cover, PageKind::End]);
        assert_eq!(canvas.page_ops(0).len(), 1);
        assert_eq!(canvas.page_ops(1).len(), 2);
        assert!(canvas.page_ops(2).is_empty());
        assert!(canvas.page_footer(0).is_none());
        assert_eq!(canvas.page_footer(1).map(|f| f.color), Some(NamedColor::White));
    }

    #[test]
    fn test_outline_lists_pages() {
        let mut canvas = RecordingCanvas::new(210.0, 297.0);
        canvas.add_page(PageKind::Company, None);
        canvas.write_cell(&TextCell::new("<h1>Acme</h1>", 10.0, 150.0));
        let outline = String::from_utf8(canvas.finish().unwrap()).unwrap();
        assert!(outline.contains("page 1 [company]"));
        assert!(outline.contains("Acme"));
    }
}
