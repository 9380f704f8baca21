//! Incoming lookup parameters.

use serde::{Deserialize, Serialize};

/// Sheet used when the request does not name one.
pub const DEFAULT_SHEET: &str = "Sheet1";

/// A certificate lookup request. `sheet` is always resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub id: Option<String>,
    pub sheet: String,
}

impl Query {
    /// Build a query from raw request parameters.
    ///
    /// A missing or empty `sheet` falls back to [`DEFAULT_SHEET`]. The `id` is
    /// kept verbatim, including empty or whitespace-only values.
    pub fn from_params(id: Option<String>, sheet: Option<String>) -> Self {
        let sheet = sheet
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET.to_string());
        Self { id, sheet }
    }

    pub fn new(id: &str, sheet: &str) -> Self {
        Self::from_params(Some(id.to_string()), Some(sheet.to_string()))
    }
}
