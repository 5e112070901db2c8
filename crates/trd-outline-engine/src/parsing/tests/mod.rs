//! Behavioural tests for the section parser.
//!
//! Fixture documents live in `fixtures/` next to this module.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{ContentItem, SectionType, Table};
use crate::parsing::{ParseOptions, parse, parse_optional, parse_with};

fn fixture(name: &str) -> String {
    let path = format!(
        "{}/src/parsing/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    );
    std::fs::read_to_string(path).unwrap()
}

#[rstest]
#[case("")]
#[case("\n\n   \n")]
#[case("just some text before any header")]
fn empty_or_headerless_input_has_no_sections(#[case] text: &str) {
    assert!(parse(text).is_empty());
}

#[test]
fn missing_document_has_no_sections() {
    assert!(parse_optional(None).is_empty());
    assert_eq!(parse_optional(Some("## A")).len(), 1);
}

#[test]
fn sections_keep_their_order_and_numbers() {
    let sections = parse("## A\n## B\n## C");

    let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
    let numbers: Vec<_> = sections.iter().map(|s| s.number).collect();
    let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(ids, vec!["section-1", "section-2", "section-3"]);
}

#[test]
fn content_after_subsection_belongs_to_it() {
    let sections = parse("## Overview\nIntro line\n### Scope\nIn scope\nAlso in scope\n## Next");

    let overview = &sections[0];
    assert_eq!(overview.content, vec![ContentItem::text("Intro line")]);
    assert_eq!(overview.subsections.len(), 1);
    assert_eq!(
        overview.subsections[0].content,
        vec![
            ContentItem::text("In scope"),
            ContentItem::text("Also in scope")
        ]
    );
    assert!(sections[1].is_empty());
}

#[test]
fn well_formed_table_is_reconstructed() {
    let sections = parse(
        "## Metrics\n\
         | Name | Value |\n\
         |------|-------|\n\
         | Latency | 200ms |\n\
         | Throughput | 500rps |",
    );

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Metrics");
    assert_eq!(
        sections[0].content,
        vec![ContentItem::Table(Table {
            headers: vec!["Name".into(), "Value".into()],
            rows: vec![
                vec!["Latency".into(), "200ms".into()],
                vec!["Throughput".into(), "500rps".into()],
            ],
            raw_content: vec![
                "| Name | Value |".into(),
                "|------|-------|".into(),
                "| Latency | 200ms |".into(),
                "| Throughput | 500rps |".into(),
            ],
        })]
    );
}

#[test]
fn header_only_table_still_produces_a_table() {
    let sections = parse("## Metrics\n| Name | Value |\nAfterwards");

    let ContentItem::Table(table) = &sections[0].content[0] else {
        panic!("expected a table, got {:?}", sections[0].content[0]);
    };
    assert_eq!(table.headers, vec!["Name", "Value"]);
    assert!(table.rows.is_empty());
    assert_eq!(sections[0].content[1], ContentItem::text("Afterwards"));
}

#[test]
fn tables_split_by_a_line_are_independent() {
    let sections = parse("## T\n| a | b |\n| 1 | 2 |\nbetween\n| c | d |\n| 3 | 4 |");

    let kinds: Vec<_> = sections[0].content.iter().map(ContentItem::kind).collect();
    assert_eq!(kinds, vec!["table", "text", "table"]);
}

#[test]
fn blank_lines_do_not_split_tables() {
    let sections = parse("## T\n| a | b |\n\n| 1 | 2 |");

    assert_eq!(sections[0].content.len(), 1);
}

#[test]
fn requirement_lines_are_tagged() {
    let sections = parse("## Requirements\nREQ-42: Must support SSO");

    assert_eq!(
        sections[0].content,
        vec![ContentItem::Requirement {
            id: "REQ-42".into(),
            content: "Must support SSO".into(),
        }]
    );
}

#[rstest]
#[case("## Security Requirements", SectionType::Security)]
#[case("## Misc Notes", SectionType::General)]
#[case("## Functional Requirements", SectionType::Requirements)]
fn section_type_comes_from_the_title(#[case] header: &str, #[case] expected: SectionType) {
    assert_eq!(parse(header)[0].section_type, expected);
}

#[test]
fn subsection_numbers_restart_under_each_section() {
    let sections = parse("## One\n### A\ntext\n### B\n## Two\n### C");

    assert_eq!(sections[0].subsections[0].number, "1.1");
    assert_eq!(sections[0].subsections[1].number, "1.2");
    assert_eq!(sections[1].subsections[0].number, "2.1");
}

#[test]
fn label_lines_become_subsections() {
    let sections = parse("## Design\nComponents:\n- API gateway\n- Worker");

    let sub = &sections[0].subsections[0];
    assert_eq!(sub.title, "Components");
    assert_eq!(sub.content.len(), 2);
}

#[test]
fn fenced_code_is_kept_per_line() {
    let sections = parse("## Code\n```rust\nlet x = 1;\n```");

    assert_eq!(
        sections[0].content,
        vec![
            ContentItem::CodeBlock {
                content: "```rust".into()
            },
            ContentItem::text("let x = 1;"),
            ContentItem::CodeBlock {
                content: "```".into()
            },
        ]
    );
}

#[test]
fn preamble_option_keeps_leading_content() {
    let options = ParseOptions {
        keep_preamble: true,
    };
    let sections = parse_with("Generated on Monday\n## Overview\nBody", &options);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].number, 0);
    assert_eq!(sections[0].content, vec![ContentItem::text("Generated on Monday")]);
    assert_eq!(sections[1].number, 1);
}

#[test]
fn preamble_option_without_leading_content_adds_nothing() {
    let options = ParseOptions {
        keep_preamble: true,
    };
    assert_eq!(parse_with("## Overview\nBody", &options), parse("## Overview\nBody"));
}

#[test]
fn label_before_first_section_is_dropped() {
    let sections = parse("Prepared for: claims team\nintro\n## Overview\nBody");

    assert_eq!(sections.len(), 1);
    assert!(sections[0].subsections.is_empty());
    assert_eq!(sections[0].content, vec![ContentItem::text("Body")]);
}

#[test]
fn preamble_option_drops_subsection_headers_before_first_section() {
    let options = ParseOptions {
        keep_preamble: true,
    };
    let sections = parse_with("intro\nScope:\norphan body\n## Real\nbody", &options);

    assert_eq!(sections.len(), 2);
    assert!(sections[0].subsections.is_empty());
    assert_eq!(
        sections[0].content,
        vec![ContentItem::text("intro"), ContentItem::text("orphan body")]
    );
    assert_eq!(sections[1].title, "Real");
    assert_eq!(sections[1].content, vec![ContentItem::text("body")]);
    invariants::check(&sections);
}

#[test]
fn windows_line_endings_are_handled() {
    let sections = parse("## A\r\n- item\r\n## B\r\n");

    assert_eq!(sections.len(), 2);
    assert_eq!(
        sections[0].content,
        vec![ContentItem::BulletList {
            content: "item".into()
        }]
    );
}

#[rstest]
#[case("sample_trd")]
#[case("messy_generation")]
fn fixtures_parse_idempotently(#[case] name: &str) {
    let text = fixture(name);
    let first = parse(&text);
    let second = parse(&text);

    assert_eq!(first, second);
    invariants::check(&first);
}

#[rstest]
#[case("sample_trd")]
#[case("messy_generation")]
fn fixtures_with_preamble_keep_invariants(#[case] name: &str) {
    let options = ParseOptions {
        keep_preamble: true,
    };
    let sections = parse_with(&fixture(name), &options);

    assert_eq!(sections[0].number, 0);
    assert_eq!(&sections[1..], parse(&fixture(name)).as_slice());
    invariants::check(&sections);
}

#[test]
fn sample_trd_structure() {
    let sections = parse(&fixture("sample_trd"));

    let outline: Vec<_> = sections
        .iter()
        .map(|s| (s.title.as_str(), s.section_type, s.subsections.len()))
        .collect();
    assert_eq!(
        outline,
        vec![
            ("Executive Summary", SectionType::General, 0),
            ("Functional Requirements", SectionType::Requirements, 2),
            ("Security Requirements", SectionType::Security, 0),
            ("Performance Metrics", SectionType::Performance, 0),
            ("ASSUMPTIONS AND CONSTRAINTS", SectionType::Assumptions, 0),
        ]
    );

    let requirement_ids: Vec<_> = sections
        .iter()
        .flat_map(|s| s.all_content())
        .filter_map(|item| match item {
            ContentItem::Requirement { id, .. } => Some(id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(requirement_ids, vec!["FR-1", "FR-2", "FR-3", "NFR-1"]);
}

#[test]
fn messy_generation_degrades_gracefully() {
    let sections = parse(&fixture("messy_generation"));

    let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Overview", "OVERVIEW OF RISKS", "Integration APIs"]);
    assert_eq!(sections[2].section_type, SectionType::Integration);

    let details = &sections[0].subsections[0];
    assert_eq!(details.title, "Details");
    let ContentItem::Table(table) = &details.content[0] else {
        panic!("expected a table, got {:?}", details.content[0]);
    };
    assert!(table.is_raw());
    assert_eq!(table.rows.len(), 2);

    assert_eq!(
        sections[1].content[0],
        ContentItem::Requirement {
            id: "REQ-9".into(),
            content: String::new(),
        }
    );

    let endpoint = &sections[2].subsections[0];
    assert_eq!(endpoint.title, "Endpoint");
    assert_eq!(endpoint.content[0].kind(), "text");
}
