use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Focus, Message, Model};
use crate::editor::{InsertCommand, Motion};

use super::event_loop::ResizeDebouncer;

/// Rows scrolled per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if let Some(draft) = &model.link_draft {
            let pasted: String = text.lines().collect();
            return Some(Message::LinkInput(format!("{}{pasted}", draft.url())));
        }
        match model.focus {
            Focus::FileName => {
                let pasted: String = text.lines().collect();
                Some(Message::FileNameInput(format!("{}{pasted}", model.file_name)))
            }
            Focus::Editor => Some(Message::InsertText(text)),
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.link_dialog_open() {
            return None;
        }
        let (width, height) = model.terminal_size();
        let layout = crate::ui::screen_layout(Rect::new(0, 0, width, height), model.preview_visible);
        let in_preview = layout
            .preview
            .is_some_and(|area| point_in_rect(mouse.column, mouse.row, area));
        let in_editor = point_in_rect(mouse.column, mouse.row, layout.editor);
        match mouse.kind {
            MouseEventKind::ScrollUp if in_preview => Some(Message::PreviewScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown if in_preview => {
                Some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_editor => Some(Message::MoveCaret {
                motion: Motion::Up,
                extend: false,
            }),
            MouseEventKind::ScrollDown if in_editor => Some(Message::MoveCaret {
                motion: Motion::Down,
                extend: false,
            }),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if let Some(draft) = &model.link_draft {
            return match key.code {
                KeyCode::Enter => Some(Message::ConfirmLink),
                KeyCode::Esc => Some(Message::CancelLink),
                KeyCode::Backspace => {
                    let mut next = draft.url().to_string();
                    next.pop();
                    Some(Message::LinkInput(next))
                }
                KeyCode::Char(c) if !ctrl && !alt => {
                    let mut next = draft.url().to_string();
                    next.push(c);
                    Some(Message::LinkInput(next))
                }
                _ => None,
            };
        }

        // Global shortcuts
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('s') if ctrl => return Some(Message::Export),
            KeyCode::Char('p') if ctrl => return Some(Message::TogglePreview),
            KeyCode::Char('r') if ctrl => return Some(Message::Reload),
            KeyCode::Char('n') if ctrl => {
                return Some(if model.focus == Focus::FileName {
                    Message::FocusEditor
                } else {
                    Message::FocusFileName
                });
            }
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Char(c) if alt && !ctrl => {
                return InsertCommand::from_hotkey(c).map(Message::Command);
            }
            KeyCode::PageUp if alt => return Some(Message::PreviewPageUp),
            KeyCode::PageDown if alt => return Some(Message::PreviewPageDown),
            KeyCode::Home if alt => return Some(Message::PreviewTop),
            KeyCode::End if alt => return Some(Message::PreviewBottom),
            _ => {}
        }

        if model.focus == Focus::FileName {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => Some(Message::FocusEditor),
                KeyCode::Backspace => {
                    let mut next = model.file_name.clone();
                    next.pop();
                    Some(Message::FileNameInput(next))
                }
                KeyCode::Char(c) if !ctrl => {
                    let mut next = model.file_name.clone();
                    next.push(c);
                    Some(Message::FileNameInput(next))
                }
                _ => None,
            };
        }

        let motion = |motion: Motion| Some(Message::MoveCaret { motion, extend: shift });
        match key.code {
            KeyCode::Char('a') if ctrl => Some(Message::SelectAll),
            KeyCode::Char(c) if !ctrl => Some(Message::InsertChar(c)),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => motion(Motion::WordLeft),
            KeyCode::Right if ctrl => motion(Motion::WordRight),
            KeyCode::Up if ctrl => Some(Message::PreviewScrollUp(1)),
            KeyCode::Down if ctrl => Some(Message::PreviewScrollDown(1)),
            KeyCode::Left => motion(Motion::Left),
            KeyCode::Right => motion(Motion::Right),
            KeyCode::Up => motion(Motion::Up),
            KeyCode::Down => motion(Motion::Down),
            KeyCode::Home if ctrl => motion(Motion::BufferStart),
            KeyCode::End if ctrl => motion(Motion::BufferEnd),
            KeyCode::Home => motion(Motion::LineStart),
            KeyCode::End => motion(Motion::LineEnd),
            KeyCode::PageUp => Some(Message::CaretPageUp { extend: shift }),
            KeyCode::PageDown => Some(Message::CaretPageDown { extend: shift }),
            _ => None,
        }
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
