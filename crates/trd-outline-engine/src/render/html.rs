use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::{ContentItem, Section, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// Renders sections as an HTML fragment.
///
/// Each section is a `<section>` carrying its id and `data-section-type`.
/// Consecutive bullet or numbered items share one list element, and
/// header-less tables fall back to a `<pre>` of their raw lines.
pub fn html(sections: &[Section]) -> String {
    let mut w = HtmlWriter::default();
    for section in sections {
        w.open(&format!(
            "<section id=\"{}\" data-section-type=\"{}\">",
            encode_double_quoted_attribute(&section.id),
            section.section_type
        ));
        w.line(&format!(
            "<h2>{}. {}</h2>",
            section.number,
            encode_text(&section.title)
        ));
        w.content(&section.content);

        for sub in &section.subsections {
            w.open(&format!(
                "<section id=\"{}\" class=\"subsection\">",
                encode_double_quoted_attribute(&sub.id)
            ));
            w.line(&format!(
                "<h3>{} {}</h3>",
                encode_text(&sub.number),
                encode_text(&sub.title)
            ));
            w.content(&sub.content);
            w.close("</section>");
        }

        w.close("</section>");
    }
    w.out
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    depth: usize,
}

impl HtmlWriter {
    fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn open(&mut self, s: &str) {
        self.line(s);
        self.depth += 1;
    }

    fn close(&mut self, s: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(s);
    }

    fn content(&mut self, items: &[ContentItem]) {
        let mut list: Option<ListKind> = None;

        for item in items {
            let kind = match item {
                ContentItem::BulletList { .. } => Some(ListKind::Bullet),
                ContentItem::NumberedList { .. } => Some(ListKind::Numbered),
                _ => None,
            };
            if list != kind {
                if let Some(open) = list {
                    self.close(&format!("</{}>", open.tag()));
                }
                if let Some(next) = kind {
                    self.open(&format!("<{}>", next.tag()));
                }
                list = kind;
            }
            self.item(item);
        }

        if let Some(open) = list {
            self.close(&format!("</{}>", open.tag()));
        }
    }

    fn item(&mut self, item: &ContentItem) {
        match item {
            ContentItem::Text { content } => self.line(&format!("<p>{}</p>", inline(content))),
            ContentItem::BoldText { content } => {
                self.line(&format!("<p class=\"bold-text\">{}</p>", inline(content)))
            }
            ContentItem::BulletList { content } | ContentItem::NumberedList { content } => {
                self.line(&format!("<li>{}</li>", inline(content)))
            }
            ContentItem::CodeBlock { content } => {
                self.line(&format!("<pre><code>{}</code></pre>", encode_text(content)))
            }
            ContentItem::Requirement { id, content } => self.line(&format!(
                "<p class=\"requirement\"><span class=\"requirement-id\">{}</span> {}</p>",
                encode_text(id),
                inline(content)
            )),
            ContentItem::Table(table) => self.table(table),
        }
    }

    fn table(&mut self, table: &Table) {
        if table.is_raw() {
            let raw = table
                .raw_content
                .iter()
                .map(|l| encode_text(l).into_owned())
                .collect::<Vec<_>>()
                .join("\n");
            self.line(&format!("<pre class=\"table-raw\">{raw}</pre>"));
            return;
        }

        self.open("<table>");
        self.line(&format!("<thead>{}</thead>", row("th", &table.headers)));
        if !table.rows.is_empty() {
            self.open("<tbody>");
            for r in &table.rows {
                self.line(&row("td", r));
            }
            self.close("</tbody>");
        }
        self.close("</table>");
    }
}

fn row(cell_tag: &str, cells: &[String]) -> String {
    let cells: String = cells
        .iter()
        .map(|c| format!("<{cell_tag}>{}</{cell_tag}>", inline(c)))
        .collect();
    format!("<tr>{cells}</tr>")
}

/// Escapes text and turns balanced `**` pairs into `<strong>`.
fn inline(text: &str) -> String {
    let parts: Vec<&str> = text.split("**").collect();
    if parts.len() % 2 == 0 {
        // Unbalanced markers are shown as typed.
        return encode_text(text).into_owned();
    }

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("<strong>{}</strong>", encode_text(part))
            } else {
                encode_text(part).into_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_sections_lists_and_tables() {
        let sections = parse(
            "## Security <Model>\n\
             Uses **OAuth** & SAML\n\
             - one\n\
             - two\n\
             1. first\n\
             ### Tokens\n\
             NFR-1: Expire after 30 min\n\
             | Token | TTL |\n\
             |---|---|\n\
             | access | 30m |",
        );

        assert_snapshot!(html(&sections), @r#"
        <section id="section-1" data-section-type="security">
          <h2>1. Security &lt;Model&gt;</h2>
          <p class="bold-text">Uses <strong>OAuth</strong> &amp; SAML</p>
          <ul>
            <li>one</li>
            <li>two</li>
          </ul>
          <ol>
            <li>first</li>
          </ol>
          <section id="section-1-1" class="subsection">
            <h3>1.1 Tokens</h3>
            <p class="requirement"><span class="requirement-id">NFR-1</span> Expire after 30 min</p>
            <table>
              <thead><tr><th>Token</th><th>TTL</th></tr></thead>
              <tbody>
                <tr><td>access</td><td>30m</td></tr>
              </tbody>
            </table>
          </section>
        </section>
        "#);
    }

    #[test]
    fn headerless_table_renders_as_preformatted_text() {
        let sections = parse("## Raw\n|---|---|\n| a<b | c |");

        assert_eq!(
            html(&sections),
            "<section id=\"section-1\" data-section-type=\"general\">\n  \
             <h2>1. Raw</h2>\n  \
             <pre class=\"table-raw\">|---|---|\n| a&lt;b | c |</pre>\n\
             </section>\n"
        );
    }

    #[test]
    fn unbalanced_bold_markers_are_escaped_verbatim() {
        assert_eq!(inline("a ** b"), "a ** b");
        assert_eq!(inline("**x** and **y**"), "<strong>x</strong> and <strong>y</strong>");
    }
}
