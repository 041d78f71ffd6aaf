use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{Focus, Model};
use crate::editor::{InsertCommand, Selection};

use super::{overlays, pane_inner, screen_layout, status};

/// Columns a tab occupies in the editor pane.
const EDITOR_TAB_WIDTH: usize = 4;

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(area, model.preview_visible);

    render_toolbar(frame, layout.toolbar);
    render_file_name(model, frame, layout.file_name);
    render_editor(model, frame, layout.editor);
    if let Some(preview) = layout.preview {
        render_preview(model, frame, preview);
    }
    status::render_stats_bar(model, frame, layout.stats);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, layout.status);
    } else {
        status::render_status_bar(model, frame, layout.status);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.link_dialog_open() {
        overlays::render_link_dialog(model, frame, area);
    }
}

fn render_toolbar(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(" Alt+", Style::default().fg(Color::Indexed(245)))];
    for command in InsertCommand::ALL {
        spans.push(Span::styled(command.hotkey().to_string(), key_style));
        spans.push(Span::raw(format!(" {}  ", command.label())));
    }
    let toolbar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(toolbar, area);
}

fn render_file_name(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::FileName;
    let label = " Name: ";
    let name_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Indexed(245))),
        Span::styled(model.file_name.clone(), name_style),
        Span::raw(crate::export::MARKDOWN_EXTENSION),
        Span::styled("  (Ctrl+N to edit)", Style::default().fg(Color::Indexed(245))),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if focused && !model.link_dialog_open() && !model.help_visible {
        let name_width = display_width(&model.file_name);
        #[allow(clippy::cast_possible_truncation)]
        let x = area.x + label.len() as u16 + name_width.min(usize::from(u16::MAX)) as u16;
        if x < area.x + area.width {
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Editor;
    let block = Block::default()
        .title(" Markdown ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    frame.render_widget(block, area);
    let inner = pane_inner(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(inner.width.saturating_sub(gutter_width + 1)).max(1);

    let (cursor_line, cursor_col) = model.caret_position();
    let cursor_line_text = buf.line_at(cursor_line).unwrap_or_default();
    let cursor_x = columns_before(&cursor_line_text, cursor_col);
    let h_offset = cursor_x.saturating_sub(text_width - 1);
    let selection = model.tracker.selection();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in model.editor_viewport.visible_range() {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        let line_start = buf.line_to_char(line_idx);
        let ends_with_newline = line_idx + 1 < total_lines;
        spans.extend(editor_line_spans(
            &line_text,
            line_start,
            ends_with_newline,
            selection,
            h_offset,
            text_width,
        ));
        content.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(content), inner);

    if focused && !model.link_dialog_open() && !model.help_visible {
        let row = cursor_line.saturating_sub(model.editor_viewport.offset());
        if row < usize::from(inner.height) {
            let x = usize::from(inner.x) + usize::from(gutter_width) + 1 + (cursor_x - h_offset);
            #[allow(clippy::cast_possible_truncation)]
            frame.set_cursor_position(Position::new(x as u16, inner.y + row as u16));
        }
    }
}

/// Spans for one editor line, clipped to `h_offset..h_offset + width` columns.
fn editor_line_spans(
    line: &str,
    line_start: usize,
    ends_with_newline: bool,
    selection: Selection,
    h_offset: usize,
    width: usize,
) -> Vec<Span<'static>> {
    let selected_style = Style::default().bg(Color::Blue).fg(Color::White);
    let is_selected = |offset: usize| offset >= selection.start && offset < selection.end;

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_selected = false;
    let mut x = 0usize;

    for (col, ch) in line.chars().enumerate() {
        let cell_width = cell_width(ch);
        let cell_start = x;
        x += cell_width;
        if cell_start < h_offset {
            continue;
        }
        if cell_start - h_offset + cell_width > width {
            break;
        }
        let selected = is_selected(line_start + col);
        if selected != run_selected && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_selected, selected_style));
        }
        run_selected = selected;
        if ch == '\t' {
            run.push_str(&" ".repeat(EDITOR_TAB_WIDTH));
        } else if cell_width == 0 {
            continue;
        } else {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_selected, selected_style));
    }

    // Show a selected line break as one highlighted cell.
    let line_len = line.chars().count();
    if ends_with_newline && is_selected(line_start + line_len) && x >= h_offset && x - h_offset < width
    {
        spans.push(Span::styled(" ", selected_style));
    }
    spans
}

fn styled_run(text: String, selected: bool, selected_style: Style) -> Span<'static> {
    if selected {
        Span::styled(text, selected_style)
    } else {
        Span::raw(text)
    }
}

fn cell_width(ch: char) -> usize {
    if ch == '\t' {
        EDITOR_TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display columns taken by the first `col` chars of `line`.
fn columns_before(line: &str, col: usize) -> usize {
    line.chars().take(col).map(cell_width).sum()
}

fn display_width(text: &str) -> usize {
    text.chars().map(cell_width).sum()
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Preview ").borders(Borders::ALL);
    frame.render_widget(block, area);
    let inner = pane_inner(area);

    if model.preview_lines.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "Nothing to preview",
            Style::default().fg(Color::Indexed(245)),
        ));
        frame.render_widget(hint, inner);
        return;
    }

    let lines: Vec<Line> = model.preview_lines[model.preview_viewport.visible_range()]
        .iter()
        .map(|line| Line::raw(line.clone()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
