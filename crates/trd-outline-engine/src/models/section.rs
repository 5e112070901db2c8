use serde::{Deserialize, Serialize};

use super::content::ContentItem;

/// Presentational category of a section, inferred from its title.
///
/// Only drives icon/colour choices in viewers; it carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Requirements,
    Security,
    Performance,
    Interface,
    Data,
    Integration,
    Assumptions,
    General,
}

impl SectionType {
    /// The serialized name, e.g. `"security"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Requirements => "requirements",
            SectionType::Security => "security",
            SectionType::Performance => "performance",
            SectionType::Interface => "interface",
            SectionType::Data => "data",
            SectionType::Integration => "integration",
            SectionType::Assumptions => "assumptions",
            SectionType::General => "general",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level division of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Positional id, `section-<number>`.
    pub id: String,
    pub title: String,
    pub section_type: SectionType,
    /// 1-based order of appearance. A synthesized preamble uses 0.
    pub number: u32,
    pub content: Vec<ContentItem>,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(number: u32, title: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            id: format!("section-{number}"),
            title: title.into(),
            section_type,
            number,
            content: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Iterates every content item in document order: the section's own
    /// content first, then each subsection's.
    pub fn all_content(&self) -> impl Iterator<Item = &ContentItem> {
        self.content
            .iter()
            .chain(self.subsections.iter().flat_map(|s| s.content.iter()))
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.subsections.is_empty()
    }
}

/// A second-level division, owned by exactly one [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    /// Positional id, `section-<n>-<m>`.
    pub id: String,
    pub title: String,
    /// Dotted number, `<section number>.<index>`.
    pub number: String,
    pub content: Vec<ContentItem>,
}

impl Subsection {
    pub fn new(section_number: u32, index: u32, title: impl Into<String>) -> Self {
        Self {
            id: format!("section-{section_number}-{index}"),
            title: title.into(),
            number: format!("{section_number}.{index}"),
            content: Vec::new(),
        }
    }
}
