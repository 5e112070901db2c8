use std::sync::OnceLock;

use regex::Regex;

use crate::models::ContentItem;

use super::table::is_table_row;

/// Classification of a single trimmed, non-blank line.
///
/// Each line is classified on its own, without reference to surrounding
/// lines; the builder decides where the result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// A pipe-delimited table row, kept raw for the table buffer.
    TableRow(String),
    SectionHeader { title: String },
    SubsectionHeader { title: String },
    Content(ContentItem),
}

/// An entry of a dispatch table: the first rule whose predicate matches wins.
pub struct Rule<T> {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> T,
}

/// Header rules, highest priority first. Only consulted for non-table lines.
pub const HEADER_RULES: &[Rule<LineClass>] = &[
    Rule {
        name: "section",
        matches: is_section_header,
        build: |line| LineClass::SectionHeader {
            title: section_title(line),
        },
    },
    Rule {
        name: "subsection",
        matches: is_subsection_header,
        build: |line| LineClass::SubsectionHeader {
            title: subsection_title(line),
        },
    },
];

/// Content rules, highest priority first. Lines matching none become text.
pub const CONTENT_RULES: &[Rule<ContentItem>] = &[
    Rule {
        name: "numbered-list",
        matches: is_numbered,
        build: |line| ContentItem::NumberedList {
            content: numbered_re().replace(line, "").trim().to_string(),
        },
    },
    Rule {
        name: "bullet-list",
        matches: is_bullet,
        build: |line| ContentItem::BulletList {
            content: line[2..].trim().to_string(),
        },
    },
    Rule {
        name: "code-block",
        matches: is_code_fence,
        build: |line| ContentItem::CodeBlock {
            content: line.to_string(),
        },
    },
    Rule {
        name: "requirement",
        matches: is_requirement,
        build: requirement,
    },
    Rule {
        name: "bold-text",
        matches: |line| bold_re().is_match(line),
        build: |line| ContentItem::BoldText {
            content: line.to_string(),
        },
    },
];

/// Classifies individual lines for the section builder.
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies a trimmed, non-blank line: table row, then headers, then content.
    pub fn classify(&self, line: &str) -> LineClass {
        if is_table_row(line) {
            return LineClass::TableRow(line.to_string());
        }

        HEADER_RULES
            .iter()
            .find(|rule| (rule.matches)(line))
            .map(|rule| (rule.build)(line))
            .unwrap_or_else(|| LineClass::Content(classify_content(line)))
    }
}

/// Classifies a content line; anything unmatched is plain text.
pub fn classify_content(line: &str) -> ContentItem {
    CONTENT_RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| (rule.build)(line))
        .unwrap_or_else(|| ContentItem::text(line))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("Invalid numbered-list regex"))
}

fn requirement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:REQ|FR|NFR)-\d+").expect("Invalid requirement regex"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*[^*]+\*\*").expect("Invalid bold regex"))
}

fn is_section_header(line: &str) -> bool {
    (line.starts_with("##") && !line.starts_with("###"))
        || line.starts_with("**")
        || (is_shouted(line) && !is_requirement(line))
}

/// Lines longer than five characters that upper-casing leaves unchanged.
fn is_shouted(line: &str) -> bool {
    line.chars().count() > 5 && line == line.to_uppercase()
}

/// `###` headings and short `label:` lines. Requirement lines keep their
/// colon as content.
fn is_subsection_header(line: &str) -> bool {
    line.starts_with("###")
        || (line.contains(':') && line.chars().count() < 100 && !is_requirement(line))
}

fn is_numbered(line: &str) -> bool {
    numbered_re().is_match(line)
}

fn is_bullet(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

fn is_code_fence(line: &str) -> bool {
    line.starts_with("```")
}

fn is_requirement(line: &str) -> bool {
    requirement_re().is_match(line)
}

fn section_title(line: &str) -> String {
    line.trim_start_matches('#').replace("**", "").trim().to_string()
}

fn subsection_title(line: &str) -> String {
    line.trim_start_matches('#')
        .replacen(':', "", 1)
        .trim()
        .to_string()
}

fn requirement(line: &str) -> ContentItem {
    let id = requirement_re()
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or_default();
    let rest = line[id.len()..].trim_start();
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('-'))
        .unwrap_or(rest);

    ContentItem::Requirement {
        id: id.to_string(),
        content: rest.trim().to_string(),
    }
}
