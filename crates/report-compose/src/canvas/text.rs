//! Naive text layout for the built-in fonts
//!
//! Glyph widths are approximated with a fixed ratio of the font size, which
//! is good enough for wrapping Helvetica body text.

use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, LINE_HEIGHT_FACTOR, mm_to_pt, pt_to_mm};
use crate::markup::text_blocks;

/// One laid-out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Font size in points
    pub size: f32,
    pub bold: bool,
    /// Vertical advance in page units
    pub advance: f32,
}

impl TextLine {
    /// Approximate rendered width in page units
    pub fn width(&self) -> f32 {
        text_width(&self.text, self.size)
    }
}

/// Font size for a heading level
pub fn heading_size(level: u8, base: f32) -> f32 {
    match level {
        1 => base * 1.75,
        2 => base * 1.5,
        3 => base * 1.25,
        4 => base * 1.1,
        _ => base,
    }
}

/// Approximate width of `text` in page units
pub fn text_width(text: &str, size: f32) -> f32 {
    pt_to_mm(text.chars().count() as f32 * size * HELVETICA_CHAR_WIDTH_RATIO)
}

/// Lay out markup in a column `width` page units wide.
pub fn layout_text(markup: &str, width: f32, base_size: f32) -> Vec<TextLine> {
    let mut lines = Vec::new();

    for block in text_blocks(markup) {
        let (size, bold) = match block.heading {
            Some(level) => (heading_size(level, base_size), true),
            None => (base_size, false),
        };
        let max_chars =
            ((mm_to_pt(width) / (size * HELVETICA_CHAR_WIDTH_RATIO)).floor() as usize).max(1);
        let advance = pt_to_mm(size * LINE_HEIGHT_FACTOR);

        for text in wrap(&block.text, max_chars) {
            lines.push(TextLine {
                text,
                size,
                bold,
                advance,
            });
        }
    }

    lines
}

/// Total height of laid-out lines
pub fn block_height(lines: &[TextLine]) -> f32 {
    lines.iter().map(|line| line.advance).sum()
}

fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Words longer than a line are hard-split
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_at_word_boundaries() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("", 5), Vec::<String>::new());
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn test_layout_headings_are_bold_and_larger() {
        let lines = layout_text("<h1>Title</h1><p>body</p>", 100.0, 12.0);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].bold);
        assert!(lines[0].size > lines[1].size);
        assert!(block_height(&lines) > 0.0);
    }

    #[test]
    fn test_lines_fit_column() {
        let text = "word ".repeat(200);
        let lines = layout_text(&text, 50.0, 12.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.width() <= 50.0 + 1e-3));
    }
}
