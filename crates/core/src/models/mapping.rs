//! Per-sheet column mappings from normalized field names to header labels.

use serde::{Deserialize, Serialize};

/// The normalized field that identifies a row.
pub const ID_FIELD: &str = "id";

/// Binds one normalized field to the header label it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub field: String,
    pub label: String,
}

impl ColumnBinding {
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
        }
    }
}

/// Column mapping and presentation order for one named sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMapping {
    pub name: String,
    /// Order in which fields are shown on the certificate page.
    #[serde(default = "default_field_order")]
    pub field_order: Vec<String>,
    /// Field bindings, in declared order.
    pub columns: Vec<ColumnBinding>,
}

fn default_field_order() -> Vec<String> {
    ["id", "name", "course", "date"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl SheetMapping {
    /// Header label of the ID column, if the mapping binds one.
    pub fn id_label(&self) -> Option<&str> {
        self.label_for(ID_FIELD)
    }

    pub fn label_for(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.label.as_str())
    }
}

/// All known sheets, keyed by exact sheet name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable(Vec<SheetMapping>);

impl MappingTable {
    pub fn new(sheets: Vec<SheetMapping>) -> Self {
        Self(sheets)
    }

    /// Look up a sheet by name. Matching is exact and case-sensitive.
    pub fn get(&self, sheet: &str) -> Option<&SheetMapping> {
        self.0.iter().find(|m| m.name == sheet)
    }

    pub fn contains(&self, sheet: &str) -> bool {
        self.get(sheet).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SheetMapping> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The mappings shipped with certify: `Sheet1` and `FS_Workshop`.
    pub fn shipped() -> Self {
        let common = |id_label: &str| {
            vec![
                ColumnBinding::new("id", id_label),
                ColumnBinding::new("name", "Name"),
                ColumnBinding::new("course", "Course"),
                ColumnBinding::new("date", "Date"),
            ]
        };
        Self(vec![
            SheetMapping {
                name: "Sheet1".into(),
                field_order: ["id", "name", "email", "course", "date", "qr"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                columns: common("C.ID"),
            },
            SheetMapping {
                name: "FS_Workshop".into(),
                field_order: default_field_order(),
                columns: common("ID"),
            },
        ])
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::shipped()
    }
}
