use relative_path::{RelativePath, RelativePathBuf};

/// File extensions recognised as generated documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "txt", "json"];

/// How a document file's content should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Markdown-flavoured text, parsed directly.
    Text,
    /// A generated-analysis JSON payload holding several documents.
    Analysis,
}

/// A generated document on disk, addressed relative to the documents root
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFile {
    relative_path: RelativePathBuf,
    display_name: String,
}

impl DocumentFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = Self::extract_display_name(&relative_path);
        Self {
            relative_path,
            display_name,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without its extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn format(&self) -> DocumentFormat {
        match self.relative_path.extension() {
            Some("json") => DocumentFormat::Analysis,
            _ => DocumentFormat::Text,
        }
    }

    fn extract_display_name(path: &RelativePath) -> String {
        path.file_stem()
            .filter(|stem| !stem.is_empty())
            .unwrap_or("Untitled")
            .to_string()
    }
}

impl From<RelativePathBuf> for DocumentFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for DocumentFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
