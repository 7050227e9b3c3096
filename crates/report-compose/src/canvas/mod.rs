//! Document canvas
//!
//! The composition driver draws through the [`Canvas`] trait. Coordinates are
//! page units with the origin at the top-left corner of the page.
//!
//! - [`LopdfCanvas`] writes a PDF document
//! - [`RecordingCanvas`] records every call, for outlines and tests

mod pdf;
mod recording;
pub mod text;

pub use pdf::LopdfCanvas;
pub use recording::{CanvasOp, RecordingCanvas};

use crate::collab::ResolvedImage;
use crate::layout::Rect;
use crate::types::{NamedColor, PageKind, Result, Rgba};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Footer text printed at the bottom of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub markup: String,
    pub color: NamedColor,
}

/// A block of markup placed at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell<'a> {
    pub markup: &'a str,
    pub x: f32,
    pub y: f32,
    /// Cell width; zero extends the cell to the right page margin
    pub width: f32,
    pub align: Align,
}

impl<'a> TextCell<'a> {
    pub fn new(markup: &'a str, x: f32, y: f32) -> Self {
        Self {
            markup,
            x,
            y,
            width: 0.0,
            align: Align::Left,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Document metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
}

/// Drawing surface for one document
pub trait Canvas {
    /// Start a new page. Later calls draw on it.
    fn add_page(&mut self, kind: PageKind, footer: Option<Footer>);

    /// Page width and height
    fn page_size(&self) -> (f32, f32);

    fn set_text_color(&mut self, color: Rgba);

    fn set_fill_color(&mut self, color: Rgba);

    fn set_font_size(&mut self, size: f32);

    /// Fill a rectangle with the fill color, honoring its opacity
    fn fill_rect(&mut self, rect: Rect);

    /// Clip later drawing to `rect` until [`Canvas::end_clip`]
    fn start_clip(&mut self, rect: Rect);

    fn end_clip(&mut self);

    /// Draw an image stretched to `rect`
    fn draw_image(&mut self, image: &ResolvedImage, rect: Rect);

    /// Write markup into a cell and return the y coordinate below it.
    ///
    /// The flow cursor moves below the cell.
    fn write_cell(&mut self, cell: &TextCell<'_>) -> f32;

    /// Write markup at the flow cursor across the content width
    fn write_flow(&mut self, markup: &str, align: Align);

    /// Move the flow cursor down
    fn ln(&mut self, height: f32);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba);

    fn set_document_info(&mut self, info: &DocumentInfo);

    /// Serialize the document
    fn finish(&mut self) -> Result<Vec<u8>>;
}
