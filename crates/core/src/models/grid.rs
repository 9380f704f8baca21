//! Raw tabular data as returned by the spreadsheet API.

use serde::{Deserialize, Serialize};

/// Rows of string cells. Row 0 is the header row; the rest are data rows.
///
/// Data rows may be shorter than the header: the Sheets API omits trailing
/// empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split into the header row and the data rows.
    ///
    /// Returns `None` unless there is a header plus at least one data row.
    pub fn header_and_rows(&self) -> Option<(&[String], &[Vec<String>])> {
        match self.rows.split_first() {
            Some((header, rows)) if !rows.is_empty() => Some((header.as_slice(), rows)),
            _ => None,
        }
    }
}

impl From<Vec<Vec<String>>> for SheetGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
