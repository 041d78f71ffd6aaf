/// Plain-text projection of the rendered buffer.
///
/// Derived data: it has no identity of its own and is replaced wholesale
/// whenever the buffer changes. `revision` is the buffer revision it was
/// rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedText {
    text: String,
    revision: u64,
}

impl RenderedText {
    pub const fn new(text: String, revision: u64) -> Self {
        Self { text, revision }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Lines of the rendered text; empty text has no lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}
