pub mod analysis;
pub mod content;
pub mod document_file;
pub mod section;

pub use analysis::{AnalysisPayload, DocumentKind};
pub use content::{ContentItem, Table};
pub use document_file::{DOCUMENT_EXTENSIONS, DocumentFile, DocumentFormat};
pub use section::{Section, SectionType, Subsection};
