use crate::models::Table;

/// A line is a table row when it has at least two pipes.
pub fn is_table_row(line: &str) -> bool {
    line.contains('|') && line.split('|').count() > 2
}

/// Trimmed, non-empty cells of a pipe-delimited row.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// A markdown separator row (`|---|:--:|`) or a row with no cell text.
///
/// Separator rows never become headers or data.
pub fn is_separator_row(line: &str) -> bool {
    let only_rule_chars = line
        .split('|')
        .all(|cell| cell.trim().chars().all(|c| c == '-' || c == ':'));
    only_rule_chars && (line.contains("---") || split_cells(line).is_empty())
}

/// Accumulates consecutive table rows until a non-table line closes it.
#[derive(Debug)]
pub struct TableBuffer {
    table: Table,
    header_slot_open: bool,
}

impl TableBuffer {
    pub fn new() -> Self {
        Self {
            table: Table::default(),
            header_slot_open: true,
        }
    }

    /// Adds a row. The first row is the header unless it is a separator.
    pub fn push_row(&mut self, line: &str) {
        self.table.raw_content.push(line.to_string());

        let first = std::mem::replace(&mut self.header_slot_open, false);
        if is_separator_row(line) {
            return;
        }

        let cells = split_cells(line);
        if first {
            self.table.headers = cells;
        } else {
            self.table.rows.push(cells);
        }
    }

    pub fn finish(self) -> Table {
        self.table
    }
}

impl Default for TableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| Name | Value |", true)]
    #[case("|------|-------|", true)]
    #[case("a | b | c", true)]
    #[case("input | output", false)]
    #[case("no pipes here", false)]
    fn detects_table_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_table_row(line), expected);
    }

    #[rstest]
    #[case("|------|-------|", true)]
    #[case("| :---: | ---: |", true)]
    #[case("|   |   |", true)]
    #[case("| Latency | 200ms |", false)]
    #[case("| Latency --- high | x |", false)]
    #[case("| - | - |", false)]
    fn detects_separator_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_separator_row(line), expected);
    }

    #[test]
    fn split_cells_drops_empty_edges() {
        assert_eq!(split_cells("| a |  | b |"), vec!["a", "b"]);
    }

    #[test]
    fn header_then_separator_then_rows() {
        let mut buffer = TableBuffer::new();
        for line in ["| Name | Value |", "|---|---|", "| Latency | 200ms |"] {
            buffer.push_row(line);
        }
        let table = buffer.finish();

        assert_eq!(table.headers, vec!["Name", "Value"]);
        assert_eq!(table.rows, vec![vec!["Latency", "200ms"]]);
        assert_eq!(table.raw_content.len(), 3);
    }

    #[test]
    fn leading_separator_leaves_headers_empty() {
        let mut buffer = TableBuffer::new();
        buffer.push_row("|---|---|");
        buffer.push_row("| a | b |");
        let table = buffer.finish();

        assert!(table.is_raw());
        assert_eq!(table.rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let mut buffer = TableBuffer::new();
        buffer.push_row("| Only | Header |");
        let table = buffer.finish();

        assert_eq!(table.headers, vec!["Only", "Header"]);
        assert!(table.rows.is_empty());
    }
}
