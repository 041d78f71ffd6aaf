//! The insertion engine.
//!
//! Every edit is a splice: the selected range is dropped, the fragment is
//! put in its place, and the caret lands right after the fragment. Typed
//! characters, toolbar snippets, pasted text and deletions all go through
//! [`insert`], so caret placement follows one rule everywhere.

use super::{Buffer, Selection};

/// Result of an edit: the new buffer and where the caret belongs in it.
#[derive(Debug, Clone)]
pub struct Insertion {
    pub buffer: Buffer,
    pub caret: usize,
}

/// Replace `selection` in `buffer` with `fragment`.
///
/// The selection is clamped to the buffer first, so a stale selection from
/// before an out-of-band replacement is corrected rather than trusted. The
/// fragment is inserted verbatim; embedded newlines or markup get no special
/// treatment. The caret is `selection.start + fragment.chars().count()`.
pub fn insert(buffer: &Buffer, selection: Selection, fragment: &str) -> Insertion {
    let Selection { start, end } = selection.clamped(buffer.len_chars());
    Insertion {
        buffer: buffer.spliced(start, end, fragment),
        caret: start + fragment.chars().count(),
    }
}

/// Backspace: remove the selection, or the char before a caret.
///
/// Returns `None` when there is nothing to delete.
pub fn delete_backward(buffer: &Buffer, selection: Selection) -> Option<Insertion> {
    let selection = selection.clamped(buffer.len_chars());
    if !selection.is_caret() {
        return Some(insert(buffer, selection, ""));
    }
    if selection.start == 0 {
        return None;
    }
    Some(insert(
        buffer,
        Selection::new(selection.start - 1, selection.start),
        "",
    ))
}

/// Delete: remove the selection, or the char after a caret.
///
/// Returns `None` when there is nothing to delete.
pub fn delete_forward(buffer: &Buffer, selection: Selection) -> Option<Insertion> {
    let len = buffer.len_chars();
    let selection = selection.clamped(len);
    if !selection.is_caret() {
        return Some(insert(buffer, selection, ""));
    }
    if selection.end >= len {
        return None;
    }
    Some(insert(
        buffer,
        Selection::new(selection.end, selection.end + 1),
        "",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty_buffer() {
        let ins = insert(&Buffer::empty(), Selection::caret(0), "**Bold** ");
        assert_eq!(ins.buffer.text(), "**Bold** ");
        assert_eq!(ins.caret, 9);
    }

    #[test]
    fn test_insert_at_caret_in_middle() {
        let buf = Buffer::from_text("hd");
        let ins = insert(&buf, Selection::caret(1), "ello worl");
        assert_eq!(ins.buffer.text(), "hello world");
        assert_eq!(ins.caret, 10);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let buf = Buffer::from_text("hello cruel world");
        let ins = insert(&buf, Selection::new(6, 12), "");
        assert_eq!(ins.buffer.text(), "hello world");
        assert_eq!(ins.caret, 6);

        let ins = insert(&buf, Selection::new(12, 6), "kind ");
        assert_eq!(ins.buffer.text(), "hello kind world");
        assert_eq!(ins.caret, 11);
    }

    #[test]
    fn test_insert_with_embedded_newlines_lands_after_fragment() {
        let buf = Buffer::from_text("ab");
        let ins = insert(&buf, Selection::caret(1), "```\nCodeblock\n``` ");
        assert_eq!(ins.buffer.text(), "a```\nCodeblock\n``` b");
        assert_eq!(ins.caret, 1 + 18);
        assert_eq!(ins.buffer.position_of(ins.caret), (2, 4));
    }

    #[test]
    fn test_insert_counts_chars_not_bytes() {
        let buf = Buffer::from_text("café");
        let ins = insert(&buf, Selection::caret(4), " ☕");
        assert_eq!(ins.buffer.text(), "café ☕");
        assert_eq!(ins.caret, 6);
    }

    #[test]
    fn test_insert_clamps_stale_selection() {
        let buf = Buffer::from_text("abc");
        let ins = insert(&buf, Selection::new(10, 20), "!");
        assert_eq!(ins.buffer.text(), "abc!");
        assert_eq!(ins.caret, 4);

        let ins = insert(&buf, Selection::new(1, 20), "!");
        assert_eq!(ins.buffer.text(), "a!");
        assert_eq!(ins.caret, 2);
    }

    #[test]
    fn test_insert_does_not_touch_source_buffer() {
        let buf = Buffer::from_text("abc");
        let ins = insert(&buf, Selection::caret(0), "x");
        assert_eq!(buf.text(), "abc");
        assert_eq!(ins.buffer.revision(), buf.revision() + 1);
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let buf = Buffer::from_text("hello");
        assert!(delete_backward(&buf, Selection::caret(0)).is_none());
    }

    #[test]
    fn test_delete_backward_removes_char_before_caret() {
        let buf = Buffer::from_text("café");
        let ins = delete_backward(&buf, Selection::caret(4)).unwrap();
        assert_eq!(ins.buffer.text(), "caf");
        assert_eq!(ins.caret, 3);
    }

    #[test]
    fn test_delete_backward_joins_lines() {
        let buf = Buffer::from_text("hello\nworld");
        let ins = delete_backward(&buf, Selection::caret(6)).unwrap();
        assert_eq!(ins.buffer.text(), "helloworld");
        assert_eq!(ins.caret, 5);
    }

    #[test]
    fn test_delete_backward_removes_selection() {
        let buf = Buffer::from_text("hello world");
        let ins = delete_backward(&buf, Selection::new(5, 11)).unwrap();
        assert_eq!(ins.buffer.text(), "hello");
        assert_eq!(ins.caret, 5);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let buf = Buffer::from_text("hello");
        assert!(delete_forward(&buf, Selection::caret(5)).is_none());
        assert!(delete_forward(&buf, Selection::caret(50)).is_none());
    }

    #[test]
    fn test_delete_forward_removes_char_after_caret() {
        let buf = Buffer::from_text("hello");
        let ins = delete_forward(&buf, Selection::caret(0)).unwrap();
        assert_eq!(ins.buffer.text(), "ello");
        assert_eq!(ins.caret, 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_length_and_caret(
                text in "\\PC{0,40}",
                fragment in "\\PC{0,12}",
                a in 0..64usize,
                b in 0..64usize,
            ) {
                let buf = Buffer::from_text(&text);
                let len = buf.len_chars();
                let sel = Selection::new(a.min(len), b.min(len));
                let frag_len = fragment.chars().count();

                let ins = insert(&buf, sel, &fragment);

                prop_assert_eq!(ins.buffer.len_chars(), len - sel.len() + frag_len);
                prop_assert_eq!(ins.caret, sel.start + frag_len);
                prop_assert_eq!(ins.buffer.slice(sel.start, ins.caret), fragment);
            }

            #[test]
            fn insert_keeps_prefix_and_suffix(
                text in "[a-z\\n ]{0,40}",
                fragment in "[A-Z\\n]{0,8}",
                a in 0..48usize,
                b in 0..48usize,
            ) {
                let buf = Buffer::from_text(&text);
                let len = buf.len_chars();
                let sel = Selection::new(a, b).clamped(len);

                let ins = insert(&buf, sel, &fragment);
                let expected = format!(
                    "{}{}{}",
                    buf.slice(0, sel.start),
                    fragment,
                    buf.slice(sel.end, len)
                );
                prop_assert_eq!(ins.buffer.text(), expected);
            }
        }
    }
}
