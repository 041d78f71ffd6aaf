use ropey::Rope;

/// Whether a character belongs to a word (letters, digits, underscore).
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// The document text, backed by a rope.
///
/// All offsets are char indices (Unicode scalar values), never bytes.
/// A buffer is never mutated in place: edits produce a new buffer with a
/// bumped revision, so anything derived from the buffer can record which
/// revision it was derived from.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    revision: u64,
}

impl Buffer {
    /// Create a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            revision: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Monotonic edit counter, bumped by every replacement or splice.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Length in UTF-8 bytes.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Clamp a char offset into `0..=len_chars()`.
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len_chars())
    }

    /// Text between two char offsets (clamped, order-insensitive).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        self.rope.slice(start..end).to_string()
    }

    /// Number of `\n`-separated lines, the same count the stats bar shows.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Line containing a char offset.
    pub fn char_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp(offset))
    }

    /// Char offset of the first character of a line.
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        let last = self.line_count().saturating_sub(1);
        self.rope.line_to_char(line_idx.min(last))
    }

    /// Zero-based (line, column) of a char offset, column in chars.
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp(offset);
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    /// Char offset for a (line, column) pair, clamped to the buffer and line.
    pub fn offset_at(&self, line_idx: usize, col: usize) -> usize {
        let line_idx = line_idx.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line_idx) + col.min(self.line_len(line_idx))
    }

    /// Start of the word at or before `offset` (Ctrl+Left).
    pub fn word_start_before(&self, offset: usize) -> usize {
        let mut pos = self.clamp(offset);
        let mut chars = self.rope.chars_at(pos);
        while let Some(ch) = chars.prev() {
            if is_word_char(ch) {
                chars.next();
                break;
            }
            pos -= 1;
        }
        while let Some(ch) = chars.prev() {
            if !is_word_char(ch) {
                break;
            }
            pos -= 1;
        }
        pos
    }

    /// Start of the next word after `offset` (Ctrl+Right).
    pub fn word_start_after(&self, offset: usize) -> usize {
        let mut pos = self.clamp(offset);
        let mut chars = self.rope.chars_at(pos);
        while let Some(ch) = chars.next() {
            if !is_word_char(ch) {
                chars.prev();
                break;
            }
            pos += 1;
        }
        for ch in chars {
            if is_word_char(ch) {
                break;
            }
            pos += 1;
        }
        pos
    }

    /// A new buffer holding `text` in full (raw replacement event).
    pub fn replaced(&self, text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            revision: self.revision + 1,
        }
    }

    /// A new buffer with `start..end` replaced by `fragment`.
    ///
    /// Offsets must already be clamped and ordered.
    pub(super) fn spliced(&self, start: usize, end: usize, fragment: &str) -> Self {
        let mut rope = self.rope.clone();
        rope.remove(start..end);
        rope.insert(start, fragment);
        Self {
            rope,
            revision: self.revision + 1,
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field(
                "rope",
                &format_args!(
                    "Rope({} chars, {} lines)",
                    self.rope.len_chars(),
                    self.rope.len_lines()
                ),
            )
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = Buffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
        assert_eq!(buf.text(), "hello\nworld");
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = Buffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = Buffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_lengths_distinguish_chars_and_bytes() {
        let buf = Buffer::from_text("café");
        assert_eq!(buf.len_chars(), 4);
        assert_eq!(buf.len_bytes(), 5);
        assert_eq!(buf.line_len(0), 4);
    }

    #[test]
    fn test_line_at_strips_crlf() {
        let buf = Buffer::from_text("one\r\ntwo");
        assert_eq!(buf.line_at(0), Some("one".to_string()));
        assert_eq!(buf.line_len(0), 3);
    }

    // --- Offsets and positions ---

    #[test]
    fn test_clamp_limits_to_length() {
        let buf = Buffer::from_text("abc");
        assert_eq!(buf.clamp(2), 2);
        assert_eq!(buf.clamp(99), 3);
    }

    #[test]
    fn test_slice_is_clamped_and_ordered() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(buf.slice(6, 11), "world");
        assert_eq!(buf.slice(11, 6), "world");
        assert_eq!(buf.slice(6, 100), "world");
    }

    #[test]
    fn test_position_of_and_offset_at_agree() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.position_of(0), (0, 0));
        assert_eq!(buf.position_of(5), (0, 5));
        assert_eq!(buf.position_of(6), (1, 0));
        assert_eq!(buf.position_of(8), (1, 2));
        assert_eq!(buf.offset_at(1, 2), 8);
    }

    #[test]
    fn test_offset_at_clamps_line_and_col() {
        let buf = Buffer::from_text("hi\nhello");
        assert_eq!(buf.offset_at(0, 10), 2);
        assert_eq!(buf.offset_at(10, 1), 4);
    }

    #[test]
    fn test_line_to_char_clamps_line() {
        let buf = Buffer::from_text("a\nb");
        assert_eq!(buf.line_to_char(1), 2);
        assert_eq!(buf.line_to_char(7), 2);
    }

    // --- Word boundaries ---

    #[test]
    fn test_word_start_before_from_middle_of_word() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(buf.word_start_before(8), 6);
    }

    #[test]
    fn test_word_start_before_from_start_of_word() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(buf.word_start_before(6), 0);
    }

    #[test]
    fn test_word_start_before_crosses_lines() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.word_start_before(6), 0);
        assert_eq!(buf.word_start_before(0), 0);
    }

    #[test]
    fn test_word_start_after_from_start() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(buf.word_start_after(0), 6);
    }

    #[test]
    fn test_word_start_after_at_end_of_line_wraps() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.word_start_after(5), 6);
    }

    #[test]
    fn test_word_start_after_at_end_is_noop() {
        let buf = Buffer::from_text("hello");
        assert_eq!(buf.word_start_after(5), 5);
    }

    // --- Revisions ---

    #[test]
    fn test_replaced_bumps_revision() {
        let buf = Buffer::from_text("one");
        let next = buf.replaced("two");
        assert_eq!(buf.revision(), 0);
        assert_eq!(next.revision(), 1);
        assert_eq!(next.text(), "two");
        assert_eq!(buf.text(), "one");
    }

    #[test]
    fn test_spliced_leaves_original_untouched() {
        let buf = Buffer::from_text("hello world");
        let next = buf.spliced(0, 5, "howdy");
        assert_eq!(next.text(), "howdy world");
        assert_eq!(buf.text(), "hello world");
        assert_eq!(next.revision(), buf.revision() + 1);
    }

    #[test]
    fn test_only_newline_breaks_lines() {
        for text in ["a\rb", "a\u{2028}b", "a\u{85}b", "a\u{c}b"] {
            let buf = Buffer::from_text(text);
            assert_eq!(buf.line_count(), 1, "{text:?}");
            assert_eq!(buf.line_count(), crate::stats::line_count(text));
        }
    }

    #[test]
    fn test_crlf_counts_once_and_is_trimmed() {
        let buf = Buffer::from_text("one\r\ntwo");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_count(), crate::stats::line_count("one\r\ntwo"));
        assert_eq!(buf.line_at(0).as_deref(), Some("one"));
        assert_eq!(buf.line_at(1).as_deref(), Some("two"));
    }
}
