use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ContentItem, Section, SectionType};

/// One line of a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub id: String,
    pub number: String,
    pub title: String,
    /// 1 for sections, 2 for subsections.
    pub depth: u8,
    pub section_type: SectionType,
}

/// Table of contents in document order.
///
/// Subsections inherit the section type of their parent.
pub fn outline(sections: &[Section]) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    for section in sections {
        entries.push(OutlineEntry {
            id: section.id.clone(),
            number: section.number.to_string(),
            title: section.title.clone(),
            depth: 1,
            section_type: section.section_type,
        });
        entries.extend(section.subsections.iter().map(|sub| OutlineEntry {
            id: sub.id.clone(),
            number: sub.number.clone(),
            title: sub.title.clone(),
            depth: 2,
            section_type: section.section_type,
        }));
    }
    entries
}

/// Counts of what a parsed document contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub sections: usize,
    pub subsections: usize,
    /// Content items per kind tag (`text`, `table`, ...).
    pub items: BTreeMap<String, usize>,
    /// Requirement ids in document order, duplicates included.
    pub requirement_ids: Vec<String>,
}

impl DocumentSummary {
    pub fn count(&self, kind: &str) -> usize {
        self.items.get(kind).copied().unwrap_or(0)
    }
}

pub fn summary(sections: &[Section]) -> DocumentSummary {
    let mut summary = DocumentSummary {
        sections: sections.len(),
        subsections: sections.iter().map(|s| s.subsections.len()).sum(),
        ..Default::default()
    };

    for item in sections.iter().flat_map(Section::all_content) {
        *summary.items.entry(item.kind().to_string()).or_default() += 1;
        if let ContentItem::Requirement { id, .. } = item {
            summary.requirement_ids.push(id.clone());
        }
    }

    summary
}
