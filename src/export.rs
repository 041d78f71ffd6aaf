//! Markdown export.
//!
//! [`export`] turns a buffer into a named artifact; an [`ExportSink`] decides
//! where the artifact ends up. The artifact is built without touching the
//! filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::editor::Buffer;

/// Extension appended to every export name.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Content type of every exported artifact.
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Name used until the user types one.
pub const DEFAULT_BASE_NAME: &str = "Untitled";

/// Errors raised while delivering an artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid export name: {0:?}")]
    InvalidName(String),
}

/// A file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    media_type: &'static str,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// `<base>.md`, always. The base is used as typed.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// The buffer's UTF-8 encoding, byte for byte.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the export name was left empty (file name is just `.md`).
    pub fn has_empty_base(&self) -> bool {
        self.file_name == MARKDOWN_EXTENSION
    }
}

/// Package the buffer as `<base>.md` with the markdown content type.
///
/// Pure: the same buffer and base always give the same artifact.
///
/// # Example
///
/// ```
/// use markpad::editor::Buffer;
/// use markpad::export::export;
///
/// let artifact = export(&Buffer::from_text("# Notes"), "notes");
/// assert_eq!(artifact.file_name(), "notes.md");
/// assert_eq!(artifact.bytes(), b"# Notes");
/// ```
pub fn export(buffer: &Buffer, base: &str) -> ExportArtifact {
    ExportArtifact {
        file_name: format!("{base}{MARKDOWN_EXTENSION}"),
        media_type: MARKDOWN_MEDIA_TYPE,
        bytes: buffer.text().into_bytes(),
    }
}

/// Delivery target for an export artifact.
pub trait ExportSink {
    /// Deliver the artifact and report where it went.
    fn save(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError>;
}

/// Writes artifacts into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        let name = artifact.file_name();
        // Names are joined onto the directory, so they may not climb out of it.
        if name.contains(['/', '\\']) || name.starts_with("..") {
            return Err(ExportError::InvalidName(name.to_string()));
        }
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;
        }
        let path = self.dir.join(name);
        fs::write(&path, artifact.bytes()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = artifact.bytes().len(), "export written");
        Ok(path)
    }
}

/// Keeps artifacts in memory. Useful wherever the filesystem is unwanted.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    saved: Vec<ExportArtifact>,
}

impl MemorySink {
    pub fn saved(&self) -> &[ExportArtifact] {
        &self.saved
    }
}

impl ExportSink for MemorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        self.saved.push(artifact.clone());
        Ok(PathBuf::from(artifact.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_names_and_types_artifact() {
        let artifact = export(&Buffer::from_text("# Hi"), "notes");
        assert_eq!(artifact.file_name(), "notes.md");
        assert_eq!(artifact.media_type(), "text/markdown");
        assert_eq!(artifact.bytes(), "# Hi".as_bytes());
        assert!(!artifact.has_empty_base());
    }

    #[test]
    fn test_export_untitled_default() {
        let artifact = export(&Buffer::from_text("body"), DEFAULT_BASE_NAME);
        assert_eq!(artifact.file_name(), "Untitled.md");
    }

    #[test]
    fn test_export_empty_base_and_buffer() {
        let artifact = export(&Buffer::empty(), "");
        assert_eq!(artifact.file_name(), ".md");
        assert!(artifact.bytes().is_empty());
        assert!(artifact.has_empty_base());
    }

    #[test]
    fn test_export_keeps_base_verbatim() {
        let artifact = export(&Buffer::empty(), "report.md");
        assert_eq!(artifact.file_name(), "report.md.md");
        let artifact = export(&Buffer::empty(), " spaced ");
        assert_eq!(artifact.file_name(), " spaced .md");
    }

    #[test]
    fn test_export_bytes_are_utf8() {
        let artifact = export(&Buffer::from_text("café ☕"), "u");
        assert_eq!(artifact.bytes(), "café ☕".as_bytes());
    }

    #[test]
    fn test_export_is_pure() {
        let buffer = Buffer::from_text("same");
        assert_eq!(export(&buffer, "a"), export(&buffer, "a"));
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let artifact = export(&Buffer::from_text("# Saved\n"), "doc");
        let path = sink.save(&artifact).unwrap();
        assert_eq!(path, dir.path().join("doc.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Saved\n");
    }

    #[test]
    fn test_directory_sink_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("md");
        let mut sink = DirectorySink::new(&nested);
        let path = sink.save(&export(&Buffer::from_text("x"), "x")).unwrap();
        assert!(path.exists());
        assert_eq!(sink.dir(), nested.as_path());
    }

    #[test]
    fn test_directory_sink_overwrites_existing() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.save(&export(&Buffer::from_text("old"), "f")).unwrap();
        let path = sink.save(&export(&Buffer::from_text("new"), "f")).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_directory_sink_rejects_path_separators() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let err = sink
            .save(&export(&Buffer::empty(), "../escape"))
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidName(_)));
    }

    #[test]
    fn test_directory_sink_reports_write_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut sink = DirectorySink::new(&blocker);
        let err = sink.save(&export(&Buffer::empty(), "a")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("failed to write"));
    }

    #[test]
    fn test_memory_sink_records_artifacts() {
        let mut sink = MemorySink::default();
        let path = sink.save(&export(&Buffer::from_text("m"), "mem")).unwrap();
        assert_eq!(path, PathBuf::from("mem.md"));
        assert_eq!(sink.saved().len(), 1);
        assert_eq!(sink.saved()[0].bytes(), b"m");
    }
}
