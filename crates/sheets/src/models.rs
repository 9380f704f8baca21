//! Google Sheets API response structs.

use certify_core::models::grid::SheetGrid;
use serde::{Deserialize, Serialize};

/// Response body of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// `values` is absent when the requested range holds no data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
}

impl ValueRange {
    /// Convert into a grid. Missing `values` become an empty grid.
    pub fn into_grid(self) -> SheetGrid {
        SheetGrid::new(self.values.unwrap_or_default())
    }
}
