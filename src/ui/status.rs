use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::export::MARKDOWN_EXTENSION;

pub fn render_stats_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let source = model.stats.buffer;
    let rendered = model.stats.rendered;
    let dim = Style::default().fg(Color::Indexed(245));
    let line = Line::from(vec![
        Span::styled(" Source: ", dim),
        Span::raw(format!(
            "{} bytes  {} words  {} lines",
            source.byte_count, source.word_count, source.line_count
        )),
        Span::styled(" \u{2502} Preview: ", dim),
        Span::raw(format!(
            "{} chars  {} words  {} paragraphs",
            rendered.char_count, rendered.word_count, rendered.paragraph_count
        )),
    ]);
    let bar = Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (line, col) = model.caret_position();
    let modified = if model.has_unexported_changes() {
        " [+]"
    } else {
        ""
    };
    let selection = model.tracker.selection();
    let selection_info = if selection.is_caret() {
        String::new()
    } else {
        format!("  ({} selected)", selection.len())
    };
    let preview_indicator = if model.preview_visible {
        format!("  [{}%]", model.preview_viewport.scroll_percent())
    } else {
        "  [no preview]".to_string()
    };

    let status = format!(
        " {}{}{}  Ln {}, Col {}{}{}  F1:help  ^S:export  ^Q:quit",
        model.file_name,
        MARKDOWN_EXTENSION,
        modified,
        line + 1,
        col + 1,
        selection_info,
        preview_indicator
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
