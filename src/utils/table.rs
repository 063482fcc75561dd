use crate::models::MonthlySummary;
use crate::services::chart_service::format_usd;

/// Column alignment inside a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A plain text table used to dump summaries into the log
pub struct Table {
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Table {
            columns: columns.iter().map(|(h, a)| (h.to_string(), *a)).collect(),
            rows: Vec::new(),
        }
    }

    /// One row per month: month, start open, end open
    pub fn from_summaries(summaries: &[MonthlySummary]) -> Self {
        let mut table = Table::new(&[
            ("Month", Align::Left),
            ("Start", Align::Right),
            ("End", Align::Right),
        ]);
        for s in summaries {
            table.add_row(vec![
                s.month.format("%Y-%m").to_string(),
                format_usd(s.start_open),
                format_usd(s.end_open),
            ]);
        }
        table
    }

    /// Extra cells beyond the column count are dropped
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.truncate(self.columns.len());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.len())
                    .fold(header.len(), usize::max)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|(h, _)| h.clone()).collect();

        let mut lines = vec![
            self.render_row(&headers, &widths),
            widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-"),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, ((_, align), &width))| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                match align {
                    Align::Left => format!("{:<width$}", cell, width = width),
                    Align::Right => format!("{:>width$}", cell, width = width),
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
