use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::layout::Rect;

use crate::document::{self, RenderedText};
use crate::editor::{Buffer, InsertCommand, Insertion, LinkDraft, SelectionTracker, insert};
use crate::export::DEFAULT_BASE_NAME;
use crate::stats::Statistics;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which input receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Editor,
    FileName,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The rendered text
/// and statistics are derived from `buffer` and are refreshed, in that
/// order, whenever the buffer changes.
pub struct Model {
    /// The markdown source being edited
    pub buffer: Buffer,
    /// Caret and selection inside `buffer`
    pub tracker: SelectionTracker,
    /// Plain-text rendering of `buffer`
    pub rendered: RenderedText,
    /// Counts over `buffer` and `rendered`
    pub stats: Statistics,
    /// Link URL being typed; `Some` while the link dialog is open
    pub link_draft: Option<LinkDraft>,
    /// Export base name (`.md` is appended on export)
    pub file_name: String,
    pub focus: Focus,
    pub preview_visible: bool,
    pub help_visible: bool,
    /// Scroll state of the editor pane (lines of `buffer`)
    pub editor_viewport: Viewport,
    /// Scroll state of the preview pane (wrapped lines of `rendered`)
    pub preview_viewport: Viewport,
    /// `rendered` wrapped to the preview width
    pub preview_lines: Vec<String>,
    /// File the buffer was loaded from, if any
    pub source_path: Option<PathBuf>,
    /// Directory exports are written into
    pub export_dir: PathBuf,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Buffer revision last written out (or loaded)
    pub(super) clean_revision: u64,
    terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unexported changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Set after first reload attempt with unexported changes
    pub reload_confirmed: bool,
    /// Reload approved by `update`, consumed by the side effects
    pub(super) reload_pending: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffer", &self.buffer)
            .field("file_name", &self.file_name)
            .field("focus", &self.focus)
            .field("preview_visible", &self.preview_visible)
            .field("link_dialog_open", &self.link_draft.is_some())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model over `text` for a terminal of the given size.
    pub fn new(text: &str, terminal_size: (u16, u16)) -> Self {
        let buffer = Buffer::from_text(text);
        let rendered = document::render(&buffer);
        let stats = Statistics::derive(&buffer, &rendered);
        let clean_revision = buffer.revision();
        let mut model = Self {
            buffer,
            tracker: SelectionTracker::default(),
            rendered,
            stats,
            link_draft: None,
            file_name: DEFAULT_BASE_NAME.to_string(),
            focus: Focus::Editor,
            preview_visible: true,
            help_visible: false,
            editor_viewport: Viewport::new(0, 0, 0),
            preview_viewport: Viewport::new(0, 0, 0),
            preview_lines: Vec::new(),
            source_path: None,
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            clean_revision,
            terminal_size,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            reload_confirmed: false,
            reload_pending: false,
        };
        model.relayout();
        model
    }

    /// Load the initial buffer from a UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn from_file(path: &Path, terminal_size: (u16, u16)) -> Result<Self> {
        let text = read_source(path)?;
        let mut model = Self::new(&text, terminal_size);
        model.source_path = Some(path.to_path_buf());
        if let Some(stem) = path.file_stem() {
            model.file_name = stem.to_string_lossy().into_owned();
        }
        Ok(model)
    }

    /// Whether the buffer changed since it was loaded or last exported.
    pub const fn has_unexported_changes(&self) -> bool {
        self.buffer.revision() != self.clean_revision
    }

    pub(super) const fn mark_clean(&mut self, revision: u64) {
        self.clean_revision = revision;
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub const fn link_dialog_open(&self) -> bool {
        self.link_draft.is_some()
    }

    /// Caret position as zero-based (line, column).
    pub fn caret_position(&self) -> (usize, usize) {
        self.buffer.position_of(self.tracker.head())
    }

    /// Splice `fragment` over the current selection.
    pub fn insert_fragment(&mut self, fragment: &str) {
        let insertion = insert(&self.buffer, self.tracker.selection(), fragment);
        self.apply_insertion(insertion);
    }

    /// Commit an insertion: new buffer, collapsed caret, editor focus.
    pub fn apply_insertion(&mut self, insertion: Insertion) {
        self.buffer = insertion.buffer;
        self.tracker = SelectionTracker::caret(insertion.caret);
        self.focus = Focus::Editor;
        self.refresh_derived();
        self.ensure_caret_visible();
    }

    /// Run a toolbar command. Link opens the dialog instead of inserting.
    pub fn apply_command(&mut self, command: InsertCommand) {
        if command.requires_draft() {
            self.link_draft = Some(LinkDraft::default());
            return;
        }
        if let Some(fragment) = command.fragment(None) {
            self.insert_fragment(&fragment);
        }
    }

    /// Close the link dialog, inserting the link when the URL is not blank.
    pub fn confirm_link(&mut self) {
        let draft = self.link_draft.take();
        if let Some(fragment) = InsertCommand::Link.fragment(draft.as_ref()) {
            self.insert_fragment(&fragment);
        }
    }

    /// Close the link dialog without touching the buffer.
    pub fn cancel_link(&mut self) {
        self.link_draft = None;
    }

    /// Replace the whole buffer (paste-over-all, reload).
    pub fn replace_buffer(&mut self, text: &str) {
        self.buffer = self.buffer.replaced(text);
        self.tracker.clamp_to(self.buffer.len_chars());
        self.refresh_derived();
        self.ensure_caret_visible();
    }

    /// Re-render and recount after a buffer change.
    pub fn refresh_derived(&mut self) {
        let _scope = crate::perf::scope("pipeline.refresh");
        let started = Instant::now();
        self.rendered = document::render(&self.buffer);
        crate::perf::log_event(
            "pipeline.render",
            format!(
                "revision={} chars={} render_ms={:.3}",
                self.rendered.revision(),
                self.rendered.as_str().chars().count(),
                started.elapsed().as_secs_f64() * 1000.0
            ),
        );
        self.stats = Statistics::derive(&self.buffer, &self.rendered);
        crate::perf::log_event(
            "pipeline.stats",
            format!(
                "revision={} bytes={} words={} lines={}",
                self.stats.revision,
                self.stats.buffer.byte_count,
                self.stats.buffer.word_count,
                self.stats.buffer.line_count
            ),
        );
        self.reflow_preview();
    }

    pub fn ensure_caret_visible(&mut self) {
        let (line, _) = self.caret_position();
        self.editor_viewport.ensure_visible(line);
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.relayout();
    }

    /// Recompute pane sizes from the terminal size and preview visibility.
    pub(super) fn relayout(&mut self) {
        let area = Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1);
        let layout = crate::ui::screen_layout(area, self.preview_visible);
        let editor = crate::ui::pane_inner(layout.editor);
        self.editor_viewport.resize(editor.width, editor.height);
        if let Some(preview) = layout.preview {
            let preview = crate::ui::pane_inner(preview);
            self.preview_viewport.resize(preview.width, preview.height);
        }
        self.reflow_preview();
        self.ensure_caret_visible();
    }

    fn reflow_preview(&mut self) {
        self.editor_viewport.set_total_lines(self.buffer.line_count());
        let width = usize::from(self.preview_viewport.width());
        self.preview_lines = if self.rendered.is_empty() {
            Vec::new()
        } else {
            crate::ui::wrap_text(self.rendered.as_str(), width)
        };
        self.preview_viewport.set_total_lines(self.preview_lines.len());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Re-read `source_path` into the buffer.
    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let Some(path) = self.source_path.clone() else {
            anyhow::bail!("no source file to reload");
        };
        let text = read_source(&path)?;
        self.replace_buffer(&text);
        self.mark_clean(self.buffer.revision());
        Ok(())
    }
}

fn read_source(path: &Path) -> Result<String> {
    let raw_bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(raw_bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new("", (80, 24))
    }
}
