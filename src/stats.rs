//! Document statistics.
//!
//! Two records are derived on every change: one over the raw buffer and one
//! over the rendered plain text. Both are recomputed in full and are pure
//! functions of their inputs.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::RenderedText;
use crate::editor::Buffer;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Counts over the raw markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferStats {
    /// UTF-8 encoded length.
    pub byte_count: usize,
    pub word_count: usize,
    /// Segments when split on `\n`; an empty buffer is one empty line.
    pub line_count: usize,
}

impl Default for BufferStats {
    fn default() -> Self {
        compute_buffer_stats("")
    }
}

/// Counts over the rendered plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderedStats {
    /// Length in chars, not bytes.
    pub char_count: usize,
    pub word_count: usize,
    /// Blank-line breaks (`\n\n`) in the source buffer.
    pub paragraph_count: usize,
}

/// Statistics for one buffer revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub revision: u64,
    pub buffer: BufferStats,
    pub rendered: RenderedStats,
}

impl Statistics {
    /// Derive both records from a buffer and its rendering.
    ///
    /// The rendering must come from the same buffer revision; the pipeline
    /// always renders before deriving statistics.
    pub fn derive(buffer: &Buffer, rendered: &RenderedText) -> Self {
        debug_assert_eq!(
            buffer.revision(),
            rendered.revision(),
            "statistics derived from a stale rendering"
        );
        let source = buffer.text();
        Self {
            revision: buffer.revision(),
            buffer: compute_buffer_stats(&source),
            rendered: compute_rendered_stats(rendered.as_str(), &source),
        }
    }
}

pub fn compute_buffer_stats(buffer: &str) -> BufferStats {
    BufferStats {
        byte_count: buffer.len(),
        word_count: word_count(buffer),
        line_count: line_count(buffer),
    }
}

/// Rendered-text counts. Paragraphs are counted in `buffer`, the source.
pub fn compute_rendered_stats(rendered: &str, buffer: &str) -> RenderedStats {
    RenderedStats {
        char_count: rendered.chars().count(),
        word_count: word_count(rendered),
        paragraph_count: paragraph_count(buffer),
    }
}

/// Maximal runs of word characters (Unicode letters, digits, connectors).
pub fn word_count(text: &str) -> usize {
    WORD.find_iter(text).count()
}

pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Non-overlapping `\n\n` occurrences.
pub fn paragraph_count(text: &str) -> usize {
    text.matches("\n\n").count()
}
