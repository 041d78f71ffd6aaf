//! Markdown rendering.
//!
//! This module handles:
//! - Parsing markdown with comrak (tables, strikethrough, autolinks)
//! - Projecting the parsed tree to plain text for preview and statistics

mod parser;
mod types;

pub use parser::{render, render_plain_text};
pub use types::RenderedText;
