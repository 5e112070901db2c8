use std::sync::OnceLock;

use regex::Regex;

use crate::models::SectionType;

/// Keyword groups in priority order; the first group found in a title wins.
///
/// Keywords match at the start of a word, case-insensitively, so `ui`
/// matches "UI Design" but not "Build", and `data` matches "Database" but
/// not "Metadata".
const KEYWORDS: &[(&str, SectionType)] = &[
    ("security|authentication", SectionType::Security),
    ("performance|scalability", SectionType::Performance),
    ("requirement|functional", SectionType::Requirements),
    ("interface|ui|user", SectionType::Interface),
    ("data|database", SectionType::Data),
    ("integration|api", SectionType::Integration),
    ("assumption|constraint", SectionType::Assumptions),
];

fn rules() -> &'static [(Regex, SectionType)] {
    static RULES: OnceLock<Vec<(Regex, SectionType)>> = OnceLock::new();
    RULES.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|(words, kind)| {
                let re = Regex::new(&format!(r"(?i)\b(?:{words})"))
                    .expect("Invalid section keyword regex");
                (re, *kind)
            })
            .collect()
    })
}

/// Infers the presentational [`SectionType`] from a section title.
pub fn infer_section_type(title: &str) -> SectionType {
    rules()
        .iter()
        .find(|(re, _)| re.is_match(title))
        .map(|(_, kind)| *kind)
        .unwrap_or(SectionType::General)
}
