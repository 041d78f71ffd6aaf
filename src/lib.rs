// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportError)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal markdown editor with live preview.
//!
//! Markpad edits markdown source in the terminal with:
//! - Toolbar commands that insert markdown snippets over the selection
//! - A live plain-text preview rendered with comrak
//! - Word, line and paragraph statistics for source and preview
//! - Export of the buffer as `<name>.md`
//!
//! ## Architecture
//!
//! Markpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Every buffer change flows through one pipeline: the edit produces a new
//! [`editor::Buffer`] revision, [`document::render`] turns it into
//! [`document::RenderedText`], and [`stats::Statistics::derive`] counts both.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Buffer, selection and insertion engine
//! - [`document`]: Markdown rendering
//! - [`stats`]: Statistics engine
//! - [`export`]: Export artifacts and sinks
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults
//! - [`perf`]: Timing and debug event logging

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod perf;
pub mod stats;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::RenderedText;
    pub use crate::editor::{Buffer, InsertCommand, Selection};
    pub use crate::stats::Statistics;
    pub use crate::ui::viewport::Viewport;
}
