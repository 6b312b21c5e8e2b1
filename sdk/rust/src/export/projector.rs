//! Row to export record projection

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::compiler::FieldNames;
use crate::value::Row;

/// Column labels of the overview export
pub mod labels {
    pub const REQUEST_ID: &str = "Request ID";
    pub const REQUEST_TYPE: &str = "Request Type";
    pub const WORKFLOW_STATUS: &str = "Workflow Status";
    pub const CREATED_ON: &str = "Created On";
    pub const CREATED_BY: &str = "Created By";
}

/// One export column: spreadsheet label and the row field it reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub field: String,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
        }
    }
}

/// The five overview columns, bound to the configured field names
pub fn overview_columns(fields: &FieldNames) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(labels::REQUEST_ID, &fields.request_id),
        ColumnSpec::new(labels::REQUEST_TYPE, &fields.request_type),
        ColumnSpec::new(labels::WORKFLOW_STATUS, &fields.workflow_status),
        ColumnSpec::new(labels::CREATED_ON, &fields.created_at),
        ColumnSpec::new(labels::CREATED_BY, &fields.created_by),
    ]
}

/// A flattened row: ordered label → display string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRecord {
    cells: Vec<(String, String)>,
}

impl ExportRecord {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Cell values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Serialized as a JSON object with keys in column order
impl Serialize for ExportRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (label, value) in &self.cells {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Project rows through the column table. One record per row; missing
/// fields render as empty strings.
pub fn project<'a, I>(rows: I, columns: &[ColumnSpec]) -> Vec<ExportRecord>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .map(|row| ExportRecord {
            cells: columns
                .iter()
                .map(|column| {
                    let value = row
                        .text(&column.field)
                        .map(|text| text.into_owned())
                        .unwrap_or_default();
                    (column.label.clone(), value)
                })
                .collect(),
        })
        .collect()
}
