//! Column mapping for tabular import sources
//!
//! Workbook sheets are read by header name, sectioned CSV by position. Both
//! end up as a [`ColumnMapping`] keyed by the workbook header names, so row
//! parsing does not care which format the row came from.

use std::collections::HashMap;

use super::field_parsers::Cell;

static EMPTY_CELL: Cell = Cell::Empty;

/// Column name to index mapping for one sheet or section
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Build a mapping from a header row
    ///
    /// Header text is trimmed and a trailing unit in parentheses is dropped,
    /// so `里程(公里)` and `里程` map to the same column. When a name appears
    /// twice the first occurrence wins.
    pub fn analyze<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name_to_index = HashMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            let name = canonical_header(header.as_ref());
            if !name.is_empty() {
                name_to_index.entry(name).or_insert(index);
            }
        }
        Self { name_to_index }
    }

    /// Build a mapping that assigns `names` to columns in order
    pub fn positional(names: &[&str]) -> Self {
        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();
        Self { name_to_index }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Cell under `column_name` in `row`
    ///
    /// Missing columns and short rows read as [`Cell::Empty`].
    pub fn cell<'a>(&self, row: &'a [Cell], column_name: &str) -> &'a Cell {
        self.get_index(column_name)
            .and_then(|index| row.get(index))
            .unwrap_or(&EMPTY_CELL)
    }
}

fn canonical_header(header: &str) -> String {
    let trimmed = header.trim();
    trimmed
        .split(['(', '（'])
        .next()
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_strips_units() {
        let mapping = ColumnMapping::analyze(["日期", " 里程(公里) ", "停车费用（元）"]);

        assert_eq!(mapping.get_index("日期"), Some(0));
        assert_eq!(mapping.get_index("里程"), Some(1));
        assert_eq!(mapping.get_index("停车费用"), Some(2));
        assert!(!mapping.has_column("里程(公里)"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mapping = ColumnMapping::analyze(["日期", "日期", ""]);
        assert_eq!(mapping.get_index("日期"), Some(0));
        assert_eq!(mapping.name_to_index.len(), 1);
    }

    #[test]
    fn test_cell_lookup_tolerates_short_rows() {
        let mapping = ColumnMapping::positional(&["日期", "停车费用"]);
        let row = vec![Cell::from("2024-03-01")];

        assert_eq!(mapping.cell(&row, "日期"), &Cell::Text("2024-03-01".into()));
        assert_eq!(mapping.cell(&row, "停车费用"), &Cell::Empty);
        assert_eq!(mapping.cell(&row, "里程"), &Cell::Empty);
    }
}
