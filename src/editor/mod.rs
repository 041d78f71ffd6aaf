//! Text editing core.
//!
//! Provides a rope-backed [`Buffer`], the [`SelectionTracker`] that follows
//! the caret, the pure [`insert`] splice every edit goes through, and the
//! toolbar [`InsertCommand`] set.

mod buffer;
mod command;
mod insert;
mod selection;

pub use buffer::Buffer;
pub use command::{InsertCommand, LinkDraft};
pub use insert::{Insertion, delete_backward, delete_forward, insert};
pub use selection::{Motion, Selection, SelectionTracker};
