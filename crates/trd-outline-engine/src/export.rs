//! Export of parsed documents through an injected [`ExportSink`].
//!
//! Callers decide where exported files go (a directory, an HTTP upload, a
//! test buffer) by supplying the sink; this module only decides what to
//! write.

use std::path::PathBuf;

use relative_path::RelativePath;

use crate::diagram::{extract_mermaid_code, has_mermaid_fence};
use crate::io::{IoError, write_file};
use crate::models::{AnalysisPayload, DocumentKind};
use crate::parsing::{ParseOptions, parse_with};
use crate::render;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid export file name: {0:?}")]
    InvalidName(String),
    #[error("Failed to write {file_name}: {source}")]
    Write { file_name: String, source: IoError },
}

/// One file produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub file_name: String,
    pub content: String,
}

/// Destination for exported files.
pub trait ExportSink {
    fn write(&mut self, entry: &ExportEntry) -> Result<(), ExportError>;
}

/// Writes entries as files below a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ExportSink for DirectorySink {
    fn write(&mut self, entry: &ExportEntry) -> Result<(), ExportError> {
        let name = &entry.file_name;
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ExportError::InvalidName(name.clone()));
        }

        write_file(RelativePath::new(name), &self.root, &entry.content).map_err(|source| {
            ExportError::Write {
                file_name: name.clone(),
                source,
            }
        })?;
        log::info!("exported {}", self.root.join(name).display());
        Ok(())
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<ExportEntry>,
}

impl ExportSink for MemorySink {
    fn write(&mut self, entry: &ExportEntry) -> Result<(), ExportError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Exports one document as `<name>.md` and `<name>.html`.
///
/// Returns the names of the files written.
pub fn export_document(
    name: &str,
    text: &str,
    sink: &mut dyn ExportSink,
    options: &ParseOptions,
) -> Result<Vec<String>, ExportError> {
    let sections = parse_with(text, options);
    let entries = [
        ExportEntry {
            file_name: format!("{name}.md"),
            content: render::markdown(&sections),
        },
        ExportEntry {
            file_name: format!("{name}.html"),
            content: render::html(&sections),
        },
    ];

    let mut written = Vec::with_capacity(entries.len());
    for entry in &entries {
        sink.write(entry)?;
        written.push(entry.file_name.clone());
    }
    Ok(written)
}

/// Exports every present document of an analysis payload.
///
/// Each field is exported as `<name>-<trd|hld|lld>`; design documents with a
/// fenced mermaid diagram also get a `.mmd` file holding the diagram code.
pub fn export_analysis(
    name: &str,
    payload: &AnalysisPayload,
    sink: &mut dyn ExportSink,
    options: &ParseOptions,
) -> Result<Vec<String>, ExportError> {
    let mut written = Vec::new();

    for (kind, text) in payload.documents() {
        let stem = format!("{name}-{}", kind.suffix());
        written.extend(export_document(&stem, text, sink, options)?);

        if kind != DocumentKind::Trd && has_mermaid_fence(text) {
            let entry = ExportEntry {
                file_name: format!("{stem}.mmd"),
                content: extract_mermaid_code(text),
            };
            sink.write(&entry)?;
            written.push(entry.file_name);
        }
    }

    Ok(written)
}
