pub mod diagram;
pub mod export;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use diagram::extract_mermaid_code;
pub use export::{DirectorySink, ExportEntry, ExportError, ExportSink, MemorySink};
pub use io::{IoError, ParsedDocument};
pub use models::*;
pub use parsing::{ParseOptions, parse, parse_optional, parse_with};
