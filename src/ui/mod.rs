//! Terminal UI components.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`render`]: Frame layout and pane drawing
//! - [`wrap`]: Preview soft wrapping

pub mod viewport;
pub mod wrap;

mod overlays;
mod render;
mod status;

pub use overlays::{help_popup_rect, link_dialog_rect};
pub use render::{line_number_width, render};
pub use wrap::wrap_text;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Toolbar row plus file-name row.
pub const HEADER_ROWS: u16 = 2;
/// Statistics row plus status row.
pub const FOOTER_ROWS: u16 = 2;
pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 50;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub toolbar: Rect,
    pub file_name: Rect,
    pub editor: Rect,
    pub preview: Option<Rect>,
    pub stats: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect, preview_visible: bool) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let (editor, preview) = if preview_visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(EDITOR_WIDTH_PERCENT),
                Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
            ])
            .split(rows[2]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[2], None)
    };
    ScreenLayout {
        toolbar: rows[0],
        file_name: rows[1],
        editor,
        preview,
        stats: rows[3],
        status: rows[4],
    }
}

/// Area inside a pane's border.
pub const fn pane_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
