//! Composition context shared by the page builders

use serde_json::Value;

use crate::canvas::{Canvas, Footer};
use crate::collab::{
    FragmentRenderer, ImageResolver, MapProvider, ProgressSink, ResolvedImage, Template,
};
use crate::layout::{
    GalleryFamily, GalleryLayout, Rect, gallery_layout, place_images, to_page_units,
};
use crate::options::ReportOptions;
use crate::spec::ReportSpec;
use crate::types::{NamedColor, Result};

use super::sequence::{ComposedPage, PageSequence};

/// External services used during composition
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub renderer: &'a dyn FragmentRenderer,
    pub images: &'a dyn ImageResolver,
    pub maps: &'a dyn MapProvider,
    pub progress: &'a dyn ProgressSink,
}

/// Everything a page builder needs, passed explicitly
pub struct ComposeContext<'a> {
    pub spec: &'a ReportSpec,
    pub options: &'a ReportOptions,
    pub collab: Collaborators<'a>,
    pub canvas: &'a mut dyn Canvas,
    pub pages: PageSequence,
    /// Footer of content pages
    pub user_footer: Footer,
    /// Footer of the end page
    pub powered_by_footer: Footer,
    current: usize,
    total: usize,
}

impl<'a> ComposeContext<'a> {
    pub fn new(
        spec: &'a ReportSpec,
        options: &'a ReportOptions,
        collab: Collaborators<'a>,
        canvas: &'a mut dyn Canvas,
        total: usize,
    ) -> Result<Self> {
        let user_footer = Footer {
            markup: collab.renderer.render(
                Template::Footer,
                &serde_json::json!({ "author": spec.author, "items": spec.footer }),
            )?,
            color: NamedColor::Gray,
        };
        let powered_by_footer = Footer {
            markup: collab.renderer.render(
                Template::PoweredByFooter,
                &serde_json::json!({ "text": options.powered_by_text }),
            )?,
            color: NamedColor::White,
        };

        Ok(Self {
            spec,
            options,
            collab,
            canvas,
            pages: PageSequence::default(),
            user_footer,
            powered_by_footer,
            current: 0,
            total,
        })
    }

    /// Emit the next progress notification
    pub fn step(&mut self, label: &str) {
        self.collab.progress.notify(label, self.current, self.total);
        self.current += 1;
    }

    /// Notifications emitted so far
    pub fn steps_taken(&self) -> usize {
        self.current
    }

    pub fn render(&self, template: Template, bindings: Value) -> Result<String> {
        log::trace!("Rendering {}", template);
        self.collab.renderer.render(template, &bindings)
    }

    /// Resolve an image at `oversample` times the given pixel size
    pub fn resolve_image(
        &self,
        reference: &str,
        width_px: u32,
        height_px: u32,
    ) -> Result<ResolvedImage> {
        let oversample = self.options.image_oversample;
        self.collab
            .images
            .resolve(reference, width_px * oversample, height_px * oversample)
    }

    /// Resolve an image, substituting a placeholder when the reference is missing
    pub fn resolve_or_placeholder(
        &self,
        reference: Option<&str>,
        width_px: u32,
        height_px: u32,
        what: &str,
    ) -> Result<ResolvedImage> {
        match reference.filter(|r| !r.is_empty()) {
            Some(reference) => self.resolve_image(reference, width_px, height_px),
            None => {
                log::warn!("No image for {}; using a placeholder", what);
                let oversample = self.options.image_oversample;
                Ok(ResolvedImage::placeholder(
                    width_px * oversample,
                    height_px * oversample,
                ))
            }
        }
    }

    /// Start a page and reset the default text and fill colors
    pub fn begin_page(&mut self, page: &ComposedPage, footer: Option<Footer>) {
        log::debug!(
            "Page {}: {} '{}' #{}",
            self.pages.len() + 1,
            page.kind,
            page.subject,
            page.index
        );
        self.canvas.add_page(page.kind, footer);
        self.canvas.set_text_color(NamedColor::Black.rgba());
        self.canvas.set_fill_color(NamedColor::Black.rgba());
    }

    /// Draw a gallery at the content origin and return its layout
    pub fn draw_gallery(
        &mut self,
        family: GalleryFamily,
        count: usize,
        images: &[String],
    ) -> Result<GalleryLayout> {
        let origin = (self.options.page_start_x, self.options.page_start_y);
        let layout = gallery_layout(family, count, origin, self.options.image_spacing);

        for placed in place_images(&layout, images) {
            if placed.reference.is_empty() {
                continue;
            }
            let image =
                self.resolve_image(&placed.reference, placed.slot.width_px, placed.slot.height_px)?;
            self.canvas.start_clip(placed.slot.rect);
            self.canvas.draw_image(&image, placed.slot.rect);
            self.canvas.end_clip();
        }

        Ok(layout)
    }

    /// Draw an image without clipping
    pub fn draw_image_at(
        &mut self,
        image: &ResolvedImage,
        x: f32,
        y: f32,
        width_px: u32,
        height_px: u32,
    ) {
        let rect = Rect::new(
            x,
            y,
            to_page_units(width_px as f32),
            to_page_units(height_px as f32),
        );
        self.canvas.draw_image(image, rect);
    }

    /// Gray rule across the content width
    pub fn draw_rule(&mut self, y: f32) {
        let (page_width, _) = self.canvas.page_size();
        let x = self.options.page_start_x;
        self.canvas
            .line((x, y), (page_width - x, y), NamedColor::Gray.rgba());
    }

    pub fn finish_page(&mut self, page: ComposedPage) {
        self.pages.push(page);
    }
}
