use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::InsertCommand;

/// Popup area for the link URL prompt.
pub fn link_dialog_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(16).max(44);
    // border + padding on both sides, then prompt, input and hint rows
    let popup_height = 9;
    centered_popup_rect(popup_width, popup_height, area)
}

/// Popup area for the help overlay.
pub fn help_popup_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(2).max(12);
    centered_popup_rect(popup_width, popup_height, area)
}

pub fn render_link_dialog(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(draft) = &model.link_draft else {
        return;
    };
    let popup = link_dialog_rect(area);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let lines = vec![
        Line::styled(
            "URL to insert as [Link](url):",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(draft.url().to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::raw(""),
        Line::styled("Enter inserts \u{2502} Esc cancels", dim_style),
    ];

    let block = Block::default()
        .title("Insert Link")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    // Input row: border(1) + padding(1) + prompt + blank
    let input_y = popup.y + 4;
    let prompt_x = popup.x + 2 + 2;
    #[allow(clippy::cast_possible_truncation)]
    let url_width = unicode_width::UnicodeWidthStr::width(draft.url()).min(usize::from(u16::MAX))
        as u16;
    let cursor_x = prompt_x.saturating_add(url_width);
    if cursor_x < popup.x + popup.width.saturating_sub(2) && input_y < popup.y + popup.height {
        frame.set_cursor_position(Position::new(cursor_x, input_y));
    }
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup = help_popup_rect(area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Insert", section_style));
    for pair in InsertCommand::ALL.chunks(2) {
        let cells: Vec<String> = pair
            .iter()
            .map(|command| format!("Alt+{}  {:<12}", command.hotkey(), command.label()))
            .collect();
        all_lines.push(Line::raw(format!("  {}", cells.concat().trim_end())));
    }
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Move caret"));
    all_lines.push(Line::raw("  Shift+movement      Extend selection"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Page caret"));
    all_lines.push(Line::raw("  Ctrl+A              Select all"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  Ctrl+P              Toggle preview"));
    all_lines.push(Line::raw("  Ctrl+Up/Down        Scroll preview"));
    all_lines.push(Line::raw("  Alt+PageUp/PageDown Page preview"));
    all_lines.push(Line::raw("  Alt+Home/End        Preview top / bottom"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  Ctrl+N              Edit export name"));
    all_lines.push(Line::raw("  Ctrl+S              Export <name>.md"));
    all_lines.push(Line::raw("  Ctrl+R              Reload source file"));
    all_lines.push(Line::raw("  Ctrl+Q / Ctrl+C     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    all_lines.push(Line::raw(format!(
        "  Export dir: {}",
        model.export_dir.display()
    )));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("Any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
