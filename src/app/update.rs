use crate::app::model::Focus;
use crate::app::{Model, ToastLevel};
use crate::editor::{InsertCommand, Motion, delete_backward, delete_forward};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character over the selection
    InsertChar(char),
    /// Insert pasted text over the selection
    InsertText(String),
    /// Insert a line break (Enter)
    InsertNewline,
    /// Delete the selection or the char before the caret (Backspace)
    DeleteBack,
    /// Delete the selection or the char after the caret (Delete)
    DeleteForward,
    /// Replace the whole buffer
    ReplaceBuffer(String),
    /// Run a toolbar insertion command
    Command(InsertCommand),

    // Caret
    /// Move the caret, extending the selection when `extend` is set
    MoveCaret { motion: Motion, extend: bool },
    /// Move the caret up one editor page
    CaretPageUp { extend: bool },
    /// Move the caret down one editor page
    CaretPageDown { extend: bool },
    /// Select the whole buffer
    SelectAll,

    // Link dialog
    /// Update the URL being typed
    LinkInput(String),
    /// Insert the link and close the dialog
    ConfirmLink,
    /// Close the dialog without inserting
    CancelLink,

    // File name
    /// Move keyboard focus to the file-name field
    FocusFileName,
    /// Update the export base name
    FileNameInput(String),
    /// Return keyboard focus to the editor
    FocusEditor,

    // File
    /// Write the buffer out as `<name>.md`
    Export,
    /// Re-read the source file from disk
    Reload,

    // View
    /// Show or hide the preview pane
    TogglePreview,
    /// Scroll the preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll the preview down by n lines
    PreviewScrollDown(usize),
    /// Scroll the preview up one page
    PreviewPageUp,
    /// Scroll the preview down one page
    PreviewPageDown,
    /// Jump to the top of the preview
    PreviewTop,
    /// Jump to the bottom of the preview
    PreviewBottom,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit application
    Quit,
}

/// Pure state transition.
///
/// Side effects (file I/O) run afterwards in
/// [`App::handle_message_side_effects`](crate::app::App).
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the quit confirmation on any action other than quitting.
    // Export preserves it so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Export) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::Reload) {
        model.reload_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            let mut buf = [0u8; 4];
            model.insert_fragment(ch.encode_utf8(&mut buf));
        }
        Message::InsertText(text) => model.insert_fragment(&text),
        Message::InsertNewline => model.insert_fragment("\n"),
        Message::DeleteBack => {
            if let Some(insertion) = delete_backward(&model.buffer, model.tracker.selection()) {
                model.apply_insertion(insertion);
            }
        }
        Message::DeleteForward => {
            if let Some(insertion) = delete_forward(&model.buffer, model.tracker.selection()) {
                model.apply_insertion(insertion);
            }
        }
        Message::ReplaceBuffer(text) => model.replace_buffer(&text),
        Message::Command(command) => model.apply_command(command),

        // Caret
        Message::MoveCaret { motion, extend } => {
            model.tracker.apply(&model.buffer, motion, extend);
            model.ensure_caret_visible();
        }
        Message::CaretPageUp { extend } => {
            for _ in 0..page_rows(&model) {
                model.tracker.apply(&model.buffer, Motion::Up, extend);
            }
            model.ensure_caret_visible();
        }
        Message::CaretPageDown { extend } => {
            for _ in 0..page_rows(&model) {
                model.tracker.apply(&model.buffer, Motion::Down, extend);
            }
            model.ensure_caret_visible();
        }
        Message::SelectAll => {
            model.tracker.select_all(model.buffer.len_chars());
            model.ensure_caret_visible();
        }

        // Link dialog
        Message::LinkInput(url) => {
            if let Some(draft) = model.link_draft.as_mut() {
                draft.set_url(url);
            }
        }
        Message::ConfirmLink => model.confirm_link(),
        Message::CancelLink => model.cancel_link(),

        // File name
        Message::FocusFileName => model.focus = Focus::FileName,
        Message::FileNameInput(name) => model.file_name = name,
        Message::FocusEditor => model.focus = Focus::Editor,

        // Export runs in side effects; a reload is only armed here
        Message::Export => {}
        Message::Reload => {
            if model.has_unexported_changes() && !model.reload_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unexported changes! Press Ctrl+R again to reload and discard them",
                );
                model.reload_confirmed = true;
            } else {
                model.reload_confirmed = false;
                model.reload_pending = true;
            }
        }

        // View
        Message::TogglePreview => {
            model.preview_visible = !model.preview_visible;
            model.relayout();
        }
        Message::PreviewScrollUp(n) => model.preview_viewport.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview_viewport.scroll_down(n),
        Message::PreviewPageUp => model.preview_viewport.page_up(),
        Message::PreviewPageDown => model.preview_viewport.page_down(),
        Message::PreviewTop => model.preview_viewport.go_to_top(),
        Message::PreviewBottom => model.preview_viewport.go_to_bottom(),
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => model.resize(width, height),

        // Application
        Message::Quit => {
            if model.has_unexported_changes() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unexported changes! Press Ctrl+Q again to quit, or Ctrl+S to export",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn page_rows(model: &Model) -> usize {
    usize::from(model.editor_viewport.height()).max(1)
}
