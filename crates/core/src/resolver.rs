//! Sheet-row resolution: header normalization, ID lookup and field mapping.

use crate::error::LookupError;
use crate::models::grid::SheetGrid;
use crate::models::mapping::{MappingTable, ID_FIELD};
use crate::models::record::{ResolvedRecord, NOT_AVAILABLE};

/// Trim and lower-case every header cell.
pub fn normalize_headers(header: &[String]) -> Vec<String> {
    header.iter().map(|h| h.trim().to_lowercase()).collect()
}

/// Index of the first normalized header equal to the lower-cased label.
pub fn column_index(headers: &[String], label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    headers.iter().position(|h| *h == label)
}

/// Resolve the record for `id` in `sheet`.
///
/// Header matching is case- and whitespace-insensitive; ID matching is exact.
/// The first data row with a matching ID wins. Mapped fields whose column is
/// absent from the header resolve to [`NOT_AVAILABLE`].
pub fn resolve(
    grid: &SheetGrid,
    sheet: &str,
    id: &str,
    mappings: &MappingTable,
) -> Result<ResolvedRecord, LookupError> {
    let mapping = mappings
        .get(sheet)
        .ok_or_else(|| LookupError::UnsupportedSheet(sheet.to_string()))?;

    let (header, rows) = grid.header_and_rows().ok_or_else(|| {
        LookupError::InvalidResponseShape(format!(
            "expected a header and at least one data row, got {} row(s)",
            grid.len()
        ))
    })?;

    let headers = normalize_headers(header);

    let id_label = mapping
        .id_label()
        .ok_or_else(|| LookupError::ColumnMissing(format!("sheet {sheet} binds no {ID_FIELD} field")))?;
    let id_index =
        column_index(&headers, id_label).ok_or_else(|| LookupError::ColumnMissing(id_label.to_string()))?;

    let row = rows
        .iter()
        .find(|row| row.get(id_index).map(String::as_str) == Some(id))
        .ok_or_else(|| LookupError::RecordNotFound {
            sheet: sheet.to_string(),
            id: id.to_string(),
        })?;

    let record = mapping
        .columns
        .iter()
        .map(|binding| {
            let value = match column_index(&headers, &binding.label) {
                Some(i) => row.get(i).cloned().unwrap_or_default(),
                None => NOT_AVAILABLE.to_string(),
            };
            (binding.field.clone(), value)
        })
        .collect();

    Ok(record)
}
