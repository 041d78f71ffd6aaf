//! Markdown rendering with comrak, projected to plain text.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::editor::Buffer;

use super::types::RenderedText;

/// Render a buffer and keep only its plain-text projection.
///
/// The result is tagged with the buffer revision it came from.
///
/// # Example
///
/// ```
/// use markpad::document::render;
/// use markpad::editor::Buffer;
///
/// let rendered = render(&Buffer::from_text("# Title\n\n**bold** text"));
/// assert_eq!(rendered.as_str(), "Title\nbold text");
/// ```
pub fn render(buffer: &Buffer) -> RenderedText {
    RenderedText::new(render_plain_text(&buffer.text()), buffer.revision())
}

/// Render markdown source to plain text.
///
/// Markup is stripped and block structure is kept as line breaks: every
/// block ends its line, table cells are tab-separated, soft breaks become
/// spaces, images keep their alt text, raw HTML and thematic breaks vanish.
pub fn render_plain_text(source: &str) -> String {
    let arena = Arena::new();
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    let root = parse_document(&arena, source, &options);
    let mut text = String::new();
    project_node(root, &mut text);
    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    text
}

fn project_node<'a>(node: &'a AstNode<'a>, text: &mut String) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::SoftBreak => text.push(' '),
        NodeValue::LineBreak => text.push('\n'),
        NodeValue::CodeBlock(block) => {
            text.push_str(block.literal.trim_end_matches('\n'));
            end_line(text);
        }
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) | NodeValue::ThematicBreak => {}
        NodeValue::TableCell => {
            if node.previous_sibling().is_some() {
                text.push('\t');
            }
            project_children(node, text);
        }
        _ => {
            project_children(node, text);
            if data.value.block() {
                end_line(text);
            }
        }
    }
}

fn project_children<'a>(node: &'a AstNode<'a>, text: &mut String) {
    for child in node.children() {
        project_node(child, text);
    }
}

fn end_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_renders_empty() {
        assert_eq!(render_plain_text(""), "");
        assert!(render(&Buffer::empty()).is_empty());
    }

    #[test]
    fn test_heading_and_emphasis_markup_is_stripped() {
        assert_eq!(
            render_plain_text("# H1\n\n**Bold** *Italic* ~~Strikethrough~~"),
            "H1\nBold Italic Strikethrough"
        );
    }

    #[test]
    fn test_paragraphs_end_lines() {
        assert_eq!(render_plain_text("a\n\nb\n\nc"), "a\nb\nc");
    }

    #[test]
    fn test_soft_break_becomes_space() {
        assert_eq!(render_plain_text("one\ntwo"), "one two");
    }

    #[test]
    fn test_hard_break_keeps_newline() {
        assert_eq!(render_plain_text("one  \ntwo"), "one\ntwo");
    }

    #[test]
    fn test_lists_put_items_on_own_lines() {
        assert_eq!(render_plain_text("- List\n- More\n"), "List\nMore");
        assert_eq!(render_plain_text("1. Numbered List\n"), "Numbered List");
    }

    #[test]
    fn test_task_list_drops_checkbox() {
        assert_eq!(render_plain_text("- [x] done\n- [ ] todo"), "done\ntodo");
    }

    #[test]
    fn test_code_block_keeps_literal() {
        assert_eq!(render_plain_text("```\nCodeblock\n``` "), "Codeblock");
        assert_eq!(render_plain_text("use `cargo`"), "use cargo");
    }

    #[test]
    fn test_link_and_image_keep_text() {
        assert_eq!(render_plain_text("[Link](http://x.io) "), "Link");
        assert_eq!(render_plain_text("![Image](url) "), "Image");
    }

    #[test]
    fn test_autolinked_url_keeps_text() {
        assert_eq!(render_plain_text("see www.example.com"), "see www.example.com");
    }

    #[test]
    fn test_table_cells_are_tab_separated() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |";
        assert_eq!(render_plain_text(md), "a\tb\n1\t2");
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(render_plain_text("> Blockquote\n---\n"), "Blockquote");
    }

    #[test]
    fn test_html_is_dropped() {
        assert_eq!(render_plain_text("<div>\nraw\n</div>\n\nkept"), "kept");
    }

    #[test]
    fn test_render_is_idempotent_and_tagged() {
        let buf = Buffer::from_text("## H2\n\nSome *text*").replaced("## H2\n\nSome *text*");
        let first = render(&buf);
        let second = render(&buf);
        assert_eq!(first, second);
        assert_eq!(first.revision(), 1);
    }
}
