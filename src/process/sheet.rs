use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Header name → cell value for one data row.
pub type MatchedRow = BTreeMap<String, String>;

/// A sheet export split into a header line and data rows.
///
/// Splitting is deliberately naive: every comma separates a field, even one
/// inside quotes. Quote characters are simply removed from each cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trim whitespace, then drop every double quote.
pub fn clean_cell(raw: &str) -> String {
    raw.trim().replace('"', "")
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

impl SheetTable {
    pub fn parse(text: &str) -> Self {
        let mut lines = text.trim().split('\n');
        // `split` always yields at least one item, even for ""
        let headers = lines.next().map(split_line).unwrap_or_default();
        let rows = lines.map(split_line).collect();

        debug!(?headers, "parsed sheet headers");
        Self { headers, rows }
    }

    /// First row whose leading cell equals `tracking_number`, zipped with the
    /// headers. Short rows read as empty strings; surplus cells are dropped.
    pub fn find(&self, tracking_number: &str) -> Option<MatchedRow> {
        let row = self.rows.iter().enumerate().find_map(|(i, row)| {
            trace!(row = i + 1, key = ?row.first(), "checking row");
            (row.first().map(String::as_str) == Some(tracking_number)).then_some(row)
        })?;

        Some(
            self.headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect(),
        )
    }
}
