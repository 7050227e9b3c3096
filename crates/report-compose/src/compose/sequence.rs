use crate::layout::GalleryLayout;
use crate::paginate::Chunk;
use crate::types::PageKind;

/// One physical page of the composed document
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPage {
    pub kind: PageKind,
    /// Company, section, project or page title the page belongs to
    pub subject: String,
    /// Position among the pages of the same subject
    pub index: usize,
    /// Text chunk shown in the about column
    pub chunk: Option<Chunk>,
    pub gallery: Option<GalleryLayout>,
}

impl ComposedPage {
    pub fn new(kind: PageKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            index: 0,
            chunk: None,
            gallery: None,
        }
    }
}

/// Ordered list of composed pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSequence {
    pages: Vec<ComposedPage>,
}

impl PageSequence {
    pub fn push(&mut self, page: ComposedPage) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[ComposedPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn kinds(&self) -> Vec<PageKind> {
        self.pages.iter().map(|page| page.kind).collect()
    }

    /// Number of pages of `kind`
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|page| page.kind == kind).count()
    }

    /// True when the sequence opens with one cover and closes with one end page
    pub fn is_well_formed(&self) -> bool {
        let covers = self.count(PageKind::Cover);
        let ends = self.count(PageKind::End);
        covers == 1
            && ends == 1
            && self.pages.first().map(|p| p.kind) == Some(PageKind::Cover)
            && self.pages.last().map(|p| p.kind) == Some(PageKind::End)
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a ComposedPage;
    type IntoIter = std::slice::Iter<'a, ComposedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
