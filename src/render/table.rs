//! Plain-text tables with left-aligned, width-fitted columns.

use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows shorter than the header are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| width(&row[col]))
                    .chain(std::iter::once(width(&self.headers[col])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        write_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(&mut out, &rule, &widths);
        for row in &self.rows {
            write_line(&mut out, row, &widths);
        }
        out
    }
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w.saturating_sub(width(cell));
        let _ = write!(line, "{}{}  ", cell, " ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fit_widest_cell() {
        let mut table = Table::new(["ID", "Name"]);
        table.push_row(vec!["1".into(), "Ada".into()]);
        table.push_row(vec!["1234".into(), "Grace Hopper".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID    Name");
        assert_eq!(lines[1], "----  ------------");
        assert_eq!(lines[2], "1     Ada");
        assert_eq!(lines[3], "1234  Grace Hopper");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_row(vec!["x".into()]);
        assert_eq!(table.render().lines().nth(2), Some("x"));
    }

    #[test]
    fn test_non_ascii_width() {
        let mut table = Table::new(["Pay", "Job"]);
        table.push_row(vec!["£1,234".into(), "Barista".into()]);
        assert_eq!(table.render().lines().next(), Some("Pay     Job"));
    }
}
