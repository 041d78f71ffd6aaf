//! Soft wrapping of rendered plain text for the preview pane.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB_STOP: usize = 4;

/// Wrap `text` into display lines no wider than `width` columns.
///
/// Lines break at whitespace where possible; a token wider than the pane
/// is split by character. Tabs expand to the next multiple of four columns
/// so table cells line up.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.split('\n') {
        wrap_line(&expand_tabs(line), width, &mut out);
    }
    out
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut col = 0usize;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_STOP - (col % TAB_STOP);
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else {
            out.push(ch);
            col += ch.width().unwrap_or(0);
        }
    }
    out
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;
    let mut has_word = false;
    let mut wrapped = false;

    for token in split_tokens(line) {
        let token_width = UnicodeWidthStr::width(token);
        let token_is_ws = token.chars().all(char::is_whitespace);

        if current_width + token_width > width && has_word {
            out.push(std::mem::take(&mut current).trim_end().to_string());
            current_width = 0;
            has_word = false;
            wrapped = true;
        }

        if token_is_ws && wrapped && current.is_empty() {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        if token_width > width {
            for ch in token.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                    wrapped = true;
                }
                current.push(ch);
                current_width += ch_width;
            }
        } else {
            current.push_str(token);
            current_width += token_width;
        }
        has_word |= !token_is_ws;
    }

    out.push(current);
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_tokens(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut ws_state: Option<bool> = None;

    for (idx, ch) in line.char_indices() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state != is_ws => {
                out.push(&line[start..idx]);
                start = idx;
                ws_state = Some(is_ws);
            }
            None => ws_state = Some(is_ws),
            Some(_) => {}
        }
    }
    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_pass_through() {
        assert_eq!(wrap_text("one\ntwo", 20), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_indentation_is_kept_on_later_lines() {
        assert_eq!(wrap_text("a\n  b", 10), vec!["a", "  b"]);
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wide_chars_count_two_columns() {
        let lines = wrap_text("日本語テキスト", 6);
        assert_eq!(lines, vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        assert_eq!(wrap_text("a\tb", 20), vec!["a   b"]);
        assert_eq!(wrap_text("abcd\te", 20), vec!["abcd    e"]);
    }

    #[test]
    fn test_zero_width_is_treated_as_one() {
        assert_eq!(wrap_text("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_no_line_exceeds_width() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";
        for line in wrap_text(text, 12) {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 12, "{line:?}");
        }
    }
}
