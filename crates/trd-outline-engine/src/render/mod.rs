//! Projections of a parsed section tree: canonical markdown, an HTML
//! fragment, the table of contents and a content summary.

pub mod html;
pub mod markdown;
pub mod outline;

pub use html::html;
pub use markdown::markdown;
pub use outline::{DocumentSummary, OutlineEntry, outline, summary};
