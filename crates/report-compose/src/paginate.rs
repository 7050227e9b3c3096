//! Content pagination
//!
//! Long descriptions are split into page-sized chunks at paragraph
//! boundaries. Each chunk becomes one physical page of its subject.

use crate::constants::{CONTINUATION_PAGE_BUDGET, FIRST_PAGE_BUDGET, SINGLE_PAGE_BUDGET};
use crate::markup::{paragraph_elements, plain_len};

/// Plain-text length budgets used by [`paginate_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaginationBudget {
    /// Blocks shorter than this are returned whole
    pub single_page: usize,
    /// Limit while placing the first paragraph
    pub first_page: usize,
    /// Limit while placing every later paragraph
    pub continuation_page: usize,
}

impl Default for PaginationBudget {
    fn default() -> Self {
        Self {
            single_page: SINGLE_PAGE_BUDGET,
            first_page: FIRST_PAGE_BUDGET,
            continuation_page: CONTINUATION_PAGE_BUDGET,
        }
    }
}

impl PaginationBudget {
    /// Limit for the paragraph at `index` in the stream
    pub fn limit_for(&self, index: usize) -> usize {
        if index == 0 {
            self.first_page
        } else {
            self.continuation_page
        }
    }
}

/// One paragraph element of a formatted text block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// The element's markup, verbatim
    pub markup: String,
    /// Length of its text content in characters
    pub plain_len: usize,
}

/// One page's worth of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub markup: String,
}

impl Chunk {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

/// Split `markup` into its paragraph stream.
pub fn paragraph_stream(markup: &str) -> Vec<Paragraph> {
    paragraph_elements(markup)
        .into_iter()
        .map(|element| Paragraph {
            markup: element.to_string(),
            plain_len: plain_len(element),
        })
        .collect()
}

/// Split `markup` into page chunks with the default budgets.
pub fn paginate(markup: &str) -> Vec<Chunk> {
    paginate_with(markup, &PaginationBudget::default())
}

/// Split `markup` into page chunks.
///
/// The result is never empty. Short blocks, and blocks without any paragraph
/// element to cut at, come back as a single chunk equal to the input.
/// Otherwise the chunks concatenate, in order, to the paragraph stream of the
/// input; markup outside `<p>` elements is not carried over.
pub fn paginate_with(markup: &str, budget: &PaginationBudget) -> Vec<Chunk> {
    if plain_len(markup) < budget.single_page {
        return vec![Chunk::new(markup)];
    }

    let paragraphs = paragraph_stream(markup);
    if paragraphs.is_empty() {
        return vec![Chunk::new(markup)];
    }

    let mut chunks = Vec::new();
    let mut builder = ChunkBuilder::default();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let limit = budget.limit_for(index);

        if builder.len + paragraph.plain_len < limit {
            builder.push(paragraph);
        } else if builder.is_empty() {
            chunks.push(Chunk::new(paragraph.markup.clone()));
        } else {
            // The overflowing paragraph gets a page of its own instead of
            // opening the next chunk.
            chunks.push(builder.take());
            chunks.push(Chunk::new(paragraph.markup.clone()));
        }
    }

    if !builder.is_empty() {
        chunks.push(builder.take());
    }

    chunks
}

#[derive(Default)]
struct ChunkBuilder {
    markup: String,
    len: usize,
    paragraphs: usize,
}

impl ChunkBuilder {
    fn push(&mut self, paragraph: &Paragraph) {
        self.markup.push_str(&paragraph.markup);
        self.len += paragraph.plain_len;
        self.paragraphs += 1;
    }

    fn is_empty(&self) -> bool {
        self.paragraphs == 0
    }

    fn take(&mut self) -> Chunk {
        let chunk = Chunk::new(std::mem::take(&mut self.markup));
        self.len = 0;
        self.paragraphs = 0;
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(len: usize) -> String {
        format!("<p>{}</p>", "x".repeat(len))
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "<div>intro</div><p>short</p>";
        assert_eq!(paginate(text), vec![Chunk::new(text)]);
    }

    #[test]
    fn test_long_text_without_paragraphs_is_single_chunk() {
        let text = "y".repeat(5000);
        assert_eq!(paginate(&text), vec![Chunk::new(text.clone())]);
    }

    #[test]
    fn test_paragraphs_accumulate_under_budget() {
        let text = [para(400), para(400), para(350)].concat();
        let chunks = paginate(&text);
        // 400 + 400 < 1200, 800 + 350 < 1200
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].markup, text);
    }

    #[test]
    fn test_oversized_first_paragraph_stands_alone() {
        let text = [para(1500), para(100)].concat();
        let chunks = paginate(&text);
        assert_eq!(chunks, vec![Chunk::new(para(1500)), Chunk::new(para(100))]);
    }

    #[test]
    fn test_overflow_emits_pending_then_paragraph() {
        // 700 fits, 700 + 700 >= 1200 overflows: pending chunk, then the
        // overflowing paragraph alone, then the rest.
        let text = [para(700), para(700), para(300)].concat();
        let chunks = paginate(&text);
        assert_eq!(
            chunks,
            vec![
                Chunk::new(para(700)),
                Chunk::new(para(700)),
                Chunk::new(para(300)),
            ]
        );
    }

    #[test]
    fn test_first_paragraph_uses_smaller_budget() {
        let budget = PaginationBudget::default();
        assert_eq!(budget.limit_for(0), 1100);
        assert_eq!(budget.limit_for(1), 1200);
        assert_eq!(budget.limit_for(7), 1200);

        // 1100 is not < 1100: emitted alone at index 0
        let text = [para(1100), para(10)].concat();
        assert_eq!(paginate(&text).len(), 2);
    }

    #[test]
    fn test_empty_pending_paragraphs_keep_order() {
        let text = [String::from("<p></p>"), para(1300), para(5)].concat();
        let chunks = paginate(&text);
        let rebuilt: String = chunks.iter().map(|c| c.markup.as_str()).collect();
        assert_eq!(rebuilt, text);
    }
}
