//! Lightweight markup inspection
//!
//! Rendered fragments are small HTML snippets. Composition only needs to
//! measure them (plain-text length), cut them at paragraph elements, and
//! flatten them into text blocks for the PDF canvas. Nothing here builds a
//! DOM.

use std::sync::LazyLock;

use regex::Regex;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid regex"));
static RE_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>.*?</p\s*>").expect("Invalid regex"));
static RE_NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("Invalid regex"));
static RE_BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(/?)(p|div|h[1-6]|li|ul|ol|br|tr|table)\b[^>]*>").expect("Invalid regex")
});
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Remove all tags and decode character entities.
pub fn strip_tags(markup: &str) -> String {
    decode_entities(&RE_TAG.replace_all(markup, ""))
}

/// Length of the text content of `markup`, in characters.
pub fn plain_len(markup: &str) -> usize {
    strip_tags(markup).chars().count()
}

/// Every `<p>` element of `markup`, in document order, with its markup kept
/// verbatim.
pub fn paragraph_elements(markup: &str) -> Vec<&str> {
    RE_PARAGRAPH.find_iter(markup).map(|m| m.as_str()).collect()
}

/// Escape text for inclusion in markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");

    let numeric = RE_NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // `&amp;` last so that "&amp;lt;" decodes to "&lt;" and not "<"
    numeric.replace("&amp;", "&")
}

/// A run of text between block-level elements
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    /// Heading level (1-6) when the block is a heading
    pub heading: Option<u8>,
}

/// Flatten markup into blocks of plain text split at block-level elements.
///
/// Whitespace inside a block is collapsed. Empty blocks are dropped.
pub fn text_blocks(markup: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut heading: Option<u8> = None;
    let mut last = 0;

    let flush = |segment: &str, heading: Option<u8>, blocks: &mut Vec<TextBlock>| {
        let text = strip_tags(segment);
        let text = RE_WHITESPACE.replace_all(text.trim(), " ").into_owned();
        if !text.is_empty() {
            blocks.push(TextBlock { text, heading });
        }
    };

    for caps in RE_BLOCK_TAG.captures_iter(markup) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        flush(&markup[last..whole.start()], heading, &mut blocks);
        last = whole.end();

        let closing = &caps[1] == "/";
        let tag = caps[2].to_ascii_lowercase();
        heading = match (closing, tag.strip_prefix('h')) {
            (false, Some(level)) => level.parse::<u8>().ok(),
            _ => None,
        };
    }
    flush(&markup[last..], heading, &mut blocks);

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_and_entities() {
        assert_eq!(strip_tags("<p>Fish &amp; <b>chips</b></p>"), "Fish & chips");
        assert_eq!(strip_tags("a &lt;b&gt; &#65;&#x42;"), "a <b> AB");
        assert_eq!(strip_tags("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_len_counts_characters() {
        assert_eq!(plain_len("<p>héllo</p>"), 5);
        assert_eq!(plain_len(""), 0);
    }

    #[test]
    fn test_paragraph_elements_keep_markup() {
        let markup = "<h2>x</h2><p class=\"a\">one</p>\n<P>two <em>2</em></P><div>no</div>";
        let paragraphs = paragraph_elements(markup);
        assert_eq!(paragraphs, vec!["<p class=\"a\">one</p>", "<P>two <em>2</em></P>"]);
    }

    #[test]
    fn test_paragraph_elements_do_not_match_similar_tags() {
        assert!(paragraph_elements("<pre>code</pre><param>").is_empty());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }

    #[test]
    fn test_text_blocks() {
        let blocks = text_blocks("<h1>Title</h1><p>First   line</p>tail<br/>end");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].text, "Title");
        assert_eq!(blocks[0].heading, Some(1));
        assert_eq!(blocks[1].text, "First line");
        assert_eq!(blocks[1].heading, None);
        assert_eq!(blocks[2].text, "tail");
        assert_eq!(blocks[3].text, "end");
    }
}
