use crate::models::{ContentItem, Section, Table};

/// Renders sections back to canonical markdown.
///
/// Headings are written as `##` / `###` without their numbers, so parsing
/// the output yields the same titles and numbering. Tables are normalized;
/// header-less tables are written as their raw lines.
pub fn markdown(sections: &[Section]) -> String {
    let mut out = String::new();

    for section in sections {
        push_block(&mut out, &format!("## {}", section.title), &section.content);
        for sub in &section.subsections {
            push_block(&mut out, &format!("### {}", sub.title), &sub.content);
        }
    }

    out
}

fn push_block(out: &mut String, heading: &str, content: &[ContentItem]) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(heading);
    out.push('\n');

    let mut ordinal = 0usize;
    for item in content {
        ordinal = match item {
            ContentItem::NumberedList { .. } => ordinal + 1,
            _ => 0,
        };
        push_item(out, item, ordinal);
    }
}

fn push_item(out: &mut String, item: &ContentItem, ordinal: usize) {
    match item {
        ContentItem::Text { content }
        | ContentItem::CodeBlock { content }
        | ContentItem::BoldText { content } => push_line(out, content),
        ContentItem::BulletList { content } => push_line(out, &format!("- {content}")),
        ContentItem::NumberedList { content } => push_line(out, &format!("{ordinal}. {content}")),
        ContentItem::Requirement { id, content } if content.is_empty() => push_line(out, id),
        ContentItem::Requirement { id, content } => push_line(out, &format!("{id}: {content}")),
        ContentItem::Table(table) => push_table(out, table),
    }
}

fn push_table(out: &mut String, table: &Table) {
    if table.is_raw() {
        for line in &table.raw_content {
            push_line(out, line);
        }
        return;
    }

    push_line(out, &pipe_row(&table.headers));
    let rule = vec!["---".to_string(); table.headers.len()];
    push_line(out, &pipe_row(&rule));
    for row in &table.rows {
        push_line(out, &pipe_row(row));
    }
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
