use crate::models::{
    AnalysisPayload, DOCUMENT_EXTENSIONS, DocumentFile, DocumentFormat, DocumentKind, Section,
};
use crate::parsing::{ParseOptions, parse_with};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid documents directory: {0}")]
    InvalidDocumentsDir(String),
    #[error("Invalid analysis payload in {path}: {source}")]
    InvalidAnalysis {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A parsed view of one generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Display title, e.g. `trd` or `analysis-42 (hld)`.
    pub title: String,
    /// Which analysis field this came from; `None` for plain text files.
    pub kind: Option<DocumentKind>,
    pub sections: Vec<Section>,
}

/// Read a document file and return its content
pub fn read_document(
    relative_path: &RelativePath,
    documents_root: &Path,
) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(documents_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a file below the root, creating parent directories
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Parse a generated-analysis JSON payload
pub fn parse_analysis(json: &str, path: &Path) -> Result<AnalysisPayload, IoError> {
    serde_json::from_str(json).map_err(|source| IoError::InvalidAnalysis {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a generated-analysis JSON payload from disk
pub fn load_analysis(path: &Path) -> Result<AnalysisPayload, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    parse_analysis(&json, path)
}

/// Read and parse a document file.
///
/// Text files yield one parsed document; analysis payloads yield one per
/// present `trd` / `hld` / `lld` field.
pub fn read_parsed(
    file: &DocumentFile,
    documents_root: &Path,
    options: &ParseOptions,
) -> Result<Vec<ParsedDocument>, IoError> {
    let content = read_document(file.relative_path(), documents_root)?;

    let parsed = match file.format() {
        DocumentFormat::Text => vec![ParsedDocument {
            title: file.display_name().to_string(),
            kind: None,
            sections: parse_with(&content, options),
        }],
        DocumentFormat::Analysis => {
            let path = file.relative_path().to_path(documents_root);
            let payload = parse_analysis(&content, &path)?;
            payload
                .documents()
                .map(|(kind, text)| ParsedDocument {
                    title: format!("{} ({})", file.display_name(), kind.suffix()),
                    kind: Some(kind),
                    sections: parse_with(text, options),
                })
                .collect()
        }
    };

    log::debug!(
        "read {} as {} document(s)",
        file.relative_path(),
        parsed.len()
    );
    Ok(parsed)
}

/// Scan for document files below the documents directory, sorted by path
pub fn scan_documents(documents_root: &Path) -> Result<Vec<DocumentFile>, IoError> {
    validate_documents_dir(documents_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(documents_root, &mut files)?;
    files.sort();

    Ok(files
        .iter()
        .filter_map(|path| path.strip_prefix(documents_root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .map(DocumentFile::new)
        .collect())
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && DOCUMENT_EXTENSIONS.contains(&ext)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_documents_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocumentsDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
