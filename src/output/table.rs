//! Box-drawn text tables for report summaries.
//!
//! The first column is left-aligned (benchmark names), the rest are
//! right-aligned numbers. Widths are measured in characters.

use std::fmt;

/// A titled table of pre-formatted cells
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with empty cells
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .chain(self.headers.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "━".repeat(w + 2)).collect();
    format!("  {}{}{}", left, segments.join(&mid.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i == 0 {
                format!(" {:<w$} ", cell, w = w)
            } else {
                format!(" {:>w$} ", cell, w = w)
            }
        })
        .collect();
    format!("  ┃{}┃", padded.join("┃"))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        writeln!(f, "  {}", self.title)?;
        writeln!(f, "{}", rule(&widths, '┏', '┳', '┓'))?;
        writeln!(f, "{}", line(&self.headers, &widths))?;
        writeln!(f, "{}", rule(&widths, '┣', '╋', '┫'))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row, &widths))?;
        }
        write!(f, "{}", rule(&widths, '┗', '┻', '┛'))
    }
}

/// Four significant decimals, the usual precision for ratios
pub fn fmt_ratio(value: f64) -> String {
    format!("{:.4}", value)
}

/// A fraction rendered as a percentage
pub fn fmt_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align() {
        let mut table = Table::new("Hit rates", &["Benchmark", "Rate"]);
        table.push_row(vec!["Crypt".to_string(), "0.5000".to_string()]);
        table.push_row(vec!["SparseMatmult".to_string(), "1.0000".to_string()]);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  Hit rates");
        assert_eq!(lines.len(), 7);
        assert!(lines[4].starts_with("  ┃ Crypt "));
        assert!(lines[4].ends_with("┃ 0.5000 ┃"));
        let widths: Vec<usize> = lines[1..].iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new("t", &["a", "b", "c"]);
        table.push_row(vec!["x".to_string()]);
        assert!(table.to_string().contains("┃ x ┃   ┃   ┃"));
    }

    #[test]
    fn test_formatters() {
        assert_eq!(fmt_ratio(2.0 / 3.0), "0.6667");
        assert_eq!(fmt_percent(0.256), "25.6%");
    }
}
