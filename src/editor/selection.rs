use super::Buffer;

/// A selected range of char offsets, `start <= end`.
///
/// `start == end` is a plain caret. A selection is captured before an edit
/// and goes stale as soon as the buffer changes, so it is always clamped
/// against the buffer it is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two offsets in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Empty selection at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Both bounds clamped to `0..=len`.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Caret movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
}

/// Tracks the active selection as an anchor and a moving head.
///
/// The head is where the caret is drawn. Plain motions collapse the
/// selection onto the head; extending motions keep the anchor in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    anchor: usize,
    head: usize,
    /// Remembered column for vertical movement (sticky column).
    goal_col: Option<usize>,
}

impl SelectionTracker {
    /// A collapsed tracker at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
            goal_col: None,
        }
    }

    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// The current selection, ordered.
    pub const fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// Pull both ends back inside a buffer of `len` chars.
    pub fn clamp_to(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }

    /// Select the whole buffer, head at the end.
    pub const fn select_all(&mut self, len: usize) {
        self.anchor = 0;
        self.head = len;
        self.goal_col = None;
    }

    /// Move the head to `pos`, dragging the anchor along unless extending.
    pub const fn move_to(&mut self, pos: usize, extend: bool) {
        self.head = pos;
        if !extend {
            self.anchor = pos;
        }
    }

    /// Apply a caret motion within `buffer`.
    pub fn apply(&mut self, buffer: &Buffer, motion: Motion, extend: bool) {
        self.clamp_to(buffer.len_chars());
        let selection = self.selection();
        let head = self.head;

        if matches!(motion, Motion::Up | Motion::Down) {
            self.move_vertically(buffer, motion, extend);
            return;
        }
        self.goal_col = None;

        let target = match motion {
            Motion::Left if !extend && !selection.is_caret() => selection.start,
            Motion::Right if !extend && !selection.is_caret() => selection.end,
            Motion::Left => head.saturating_sub(1),
            Motion::Right => buffer.clamp(head + 1),
            Motion::LineStart => buffer.line_to_char(buffer.char_to_line(head)),
            Motion::LineEnd => {
                let line = buffer.char_to_line(head);
                buffer.line_to_char(line) + buffer.line_len(line)
            }
            Motion::WordLeft => buffer.word_start_before(head),
            Motion::WordRight => buffer.word_start_after(head),
            Motion::BufferStart => 0,
            Motion::BufferEnd => buffer.len_chars(),
            Motion::Up | Motion::Down => head,
        };
        self.move_to(target, extend);
    }

    fn move_vertically(&mut self, buffer: &Buffer, motion: Motion, extend: bool) {
        let (line, col) = buffer.position_of(self.head);
        let goal = self.goal_col.unwrap_or(col);
        let target_line = match motion {
            Motion::Up if line > 0 => line - 1,
            Motion::Down if line + 1 < buffer.line_count() => line + 1,
            _ => line,
        };
        let target = if target_line == line {
            self.head
        } else {
            buffer.offset_at(target_line, goal)
        };
        self.move_to(target, extend);
        self.goal_col = Some(goal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_at(pos: usize) -> SelectionTracker {
        SelectionTracker::caret(pos)
    }

    // --- Selection ---

    #[test]
    fn test_selection_new_orders_bounds() {
        assert_eq!(Selection::new(5, 2), Selection { start: 2, end: 5 });
        assert_eq!(Selection::new(2, 5).len(), 3);
    }

    #[test]
    fn test_selection_clamped_to_buffer_length() {
        let sel = Selection::new(4, 40).clamped(10);
        assert_eq!(sel, Selection { start: 4, end: 10 });
        let stale = Selection::new(20, 40).clamped(10);
        assert_eq!(stale, Selection::caret(10));
    }

    #[test]
    fn test_caret_is_empty_selection() {
        let sel = Selection::caret(3);
        assert!(sel.is_caret());
        assert_eq!(sel.len(), 0);
    }

    // --- Tracker horizontal motion ---

    #[test]
    fn test_left_at_start_is_noop() {
        let buf = Buffer::from_text("hello");
        let mut t = tracker_at(0);
        t.apply(&buf, Motion::Left, false);
        assert_eq!(t.head(), 0);
    }

    #[test]
    fn test_right_at_end_is_noop() {
        let buf = Buffer::from_text("hello");
        let mut t = tracker_at(5);
        t.apply(&buf, Motion::Right, false);
        assert_eq!(t.head(), 5);
    }

    #[test]
    fn test_right_crosses_newline() {
        let buf = Buffer::from_text("hi\nyo");
        let mut t = tracker_at(2);
        t.apply(&buf, Motion::Right, false);
        assert_eq!(buf.position_of(t.head()), (1, 0));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let buf = Buffer::from_text("hello");
        let mut t = tracker_at(1);
        t.apply(&buf, Motion::Right, true);
        t.apply(&buf, Motion::Right, true);
        assert_eq!(t.selection(), Selection::new(1, 3));
        assert_eq!(t.anchor(), 1);
    }

    #[test]
    fn test_plain_left_collapses_to_selection_start() {
        let buf = Buffer::from_text("hello");
        let mut t = tracker_at(1);
        t.apply(&buf, Motion::LineEnd, true);
        t.apply(&buf, Motion::Left, false);
        assert_eq!(t.selection(), Selection::caret(1));
    }

    #[test]
    fn test_plain_right_collapses_to_selection_end() {
        let buf = Buffer::from_text("hello");
        let mut t = tracker_at(4);
        t.apply(&buf, Motion::LineStart, true);
        t.apply(&buf, Motion::Right, false);
        assert_eq!(t.selection(), Selection::caret(4));
    }

    #[test]
    fn test_line_start_and_end() {
        let buf = Buffer::from_text("one\ntwo three\nfour");
        let mut t = tracker_at(6);
        t.apply(&buf, Motion::LineEnd, false);
        assert_eq!(t.head(), 13);
        t.apply(&buf, Motion::LineStart, false);
        assert_eq!(t.head(), 4);
    }

    #[test]
    fn test_buffer_start_and_end() {
        let buf = Buffer::from_text("hello\nworld");
        let mut t = tracker_at(3);
        t.apply(&buf, Motion::BufferEnd, false);
        assert_eq!(t.head(), 11);
        t.apply(&buf, Motion::BufferStart, true);
        assert_eq!(t.selection(), Selection::new(0, 11));
    }

    #[test]
    fn test_word_motions() {
        let buf = Buffer::from_text("hello world");
        let mut t = tracker_at(0);
        t.apply(&buf, Motion::WordRight, false);
        assert_eq!(t.head(), 6);
        t.apply(&buf, Motion::WordLeft, false);
        assert_eq!(t.head(), 0);
    }

    // --- Tracker vertical motion ---

    #[test]
    fn test_up_at_first_line_is_noop() {
        let buf = Buffer::from_text("hello\nworld");
        let mut t = tracker_at(2);
        t.apply(&buf, Motion::Up, false);
        assert_eq!(t.head(), 2);
    }

    #[test]
    fn test_down_at_last_line_is_noop() {
        let buf = Buffer::from_text("hello\nworld");
        let mut t = tracker_at(8);
        t.apply(&buf, Motion::Down, false);
        assert_eq!(t.head(), 8);
    }

    #[test]
    fn test_down_preserves_column() {
        let buf = Buffer::from_text("hello\nworld");
        let mut t = tracker_at(3);
        t.apply(&buf, Motion::Down, false);
        assert_eq!(buf.position_of(t.head()), (1, 3));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let buf = Buffer::from_text("hello\nhi\nworld");
        let mut t = tracker_at(4);
        t.apply(&buf, Motion::Down, false);
        assert_eq!(buf.position_of(t.head()), (1, 2));
        t.apply(&buf, Motion::Down, false);
        assert_eq!(buf.position_of(t.head()), (2, 4));
    }

    #[test]
    fn test_horizontal_motion_resets_column_memory() {
        let buf = Buffer::from_text("hello\nhi\nworld");
        let mut t = tracker_at(4);
        t.apply(&buf, Motion::Down, false);
        t.apply(&buf, Motion::Left, false);
        t.apply(&buf, Motion::Down, false);
        assert_eq!(buf.position_of(t.head()), (2, 1));
    }

    #[test]
    fn test_stale_tracker_is_clamped_before_motion() {
        let buf = Buffer::from_text("abc");
        let mut t = tracker_at(50);
        t.apply(&buf, Motion::Left, false);
        assert_eq!(t.head(), 2);
    }

    #[test]
    fn test_select_all() {
        let mut t = tracker_at(2);
        t.select_all(9);
        assert_eq!(t.selection(), Selection::new(0, 9));
        assert_eq!(t.head(), 9);
    }
}
