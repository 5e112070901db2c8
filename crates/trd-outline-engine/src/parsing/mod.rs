//! # Section Parsing
//!
//! Turns loosely structured, generated markdown into an ordered tree of
//! sections, subsections and typed content items.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each trimmed, non-blank line is
//!    classified on its own into a `LineClass` by walking ordered dispatch
//!    tables of `(predicate, builder)` rules
//!
//! 2. **Tree Construction** (`builder`): a `SectionBuilder` keeps the open
//!    section, subsection and table, and emits `Section`s as they close
//!
//! ## Modules
//!
//! - **`classify`**: `LineClassifier`, `HEADER_RULES` and `CONTENT_RULES`
//! - **`table`**: row detection, cell splitting and the `TableBuffer`
//! - **`builder`**: `SectionBuilder` state machine
//! - **`section_type`**: keyword-based `SectionType` inference
//!
//! ## Key Invariants
//!
//! - Parsing never fails: unmatched lines degrade to plain text
//! - Numbering is positional, so parsing the same text twice gives the same tree
//! - Blank lines carry no structure and are skipped

pub mod builder;
pub mod classify;
pub mod section_type;
pub mod table;

#[cfg(test)]
mod tests;

use crate::models::Section;

use builder::SectionBuilder;
use classify::LineClassifier;

/// Options that change how pre-header content is treated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Collect content before the first header into a `Preamble` section
    /// numbered 0 instead of dropping it.
    pub keep_preamble: bool,
}

/// Parses document text into sections using default options.
pub fn parse(text: &str) -> Vec<Section> {
    parse_with(text, &ParseOptions::default())
}

/// Parses an optional document field; a missing document has no sections.
pub fn parse_optional(text: Option<&str>) -> Vec<Section> {
    text.map(parse).unwrap_or_default()
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Vec<Section> {
    let classifier = LineClassifier;
    let mut builder = SectionBuilder::new(options.clone());

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let class = classifier.classify(line);
        log::trace!("line {}: {class:?}", index + 1);
        builder.push(class);
    }

    let sections = builder.finish();
    log::debug!(
        "parsed {} sections with {} subsections",
        sections.len(),
        sections.iter().map(|s| s.subsections.len()).sum::<usize>()
    );
    sections
}
