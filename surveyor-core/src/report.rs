//! Report table construction and preview rendering.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{FieldRecord, ScanSummary};

/// Column headers of the report sheet, in emission order.
pub const REPORT_HEADERS: [&str; 6] = [
    "Carpeta Base",
    "Nombre Shapefile",
    "Tipo de Geometría",
    "Nombre Campo",
    "Tipo de Dato",
    "Longitud",
];

/// One row of the display copy.
///
/// Folder and filename cells are blanked when they repeat the previous row,
/// simulating merged-cell grouping in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Folder cell; empty when the folder repeats the previous row.
    pub base_folder: String,
    /// Filename cell; empty when folder and filename repeat the previous row.
    pub shapefile_name: String,
    /// Geometry type cell.
    pub geometry_type: String,
    /// Field name cell.
    pub field_name: String,
    /// Data type cell.
    pub data_type: String,
    /// Length cell.
    pub length: u64,
    /// Whether this row starts a new folder group and gets highlighted.
    pub group_start: bool,
}

/// Sorted report table plus its grouping display copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    records: Vec<FieldRecord>,
    display_rows: Vec<DisplayRow>,
}

impl ReportTable {
    /// Build the table: stable sort by (folder, filename, field name), then
    /// derive the display copy.
    pub fn new(mut records: Vec<FieldRecord>) -> Self {
        records.sort_by(|a, b| {
            a.base_folder
                .cmp(&b.base_folder)
                .then_with(|| a.shapefile_name.cmp(&b.shapefile_name))
                .then_with(|| a.field_name.cmp(&b.field_name))
        });
        let display_rows = build_display_rows(&records);
        Self {
            records,
            display_rows,
        }
    }

    /// Sorted records.
    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    /// Display copy with blanked duplicates and group markers.
    pub fn display_rows(&self) -> &[DisplayRow] {
        &self.display_rows
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Headline metrics over the table.
    pub fn summary(&self) -> ScanSummary {
        let mut shapefiles = BTreeSet::new();
        let mut folders = BTreeSet::new();
        for record in &self.records {
            shapefiles.insert((record.base_folder.as_str(), record.shapefile_name.as_str()));
            folders.insert(record.base_folder.as_str());
        }
        ScanSummary {
            field_records: self.records.len(),
            shapefiles: shapefiles.len(),
            base_folders: folders.len(),
        }
    }
}

/// Render any serializable payload as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn build_display_rows(records: &[FieldRecord]) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(records.len());
    let mut previous: Option<&FieldRecord> = None;

    for record in records {
        let same_folder = previous
            .map(|prev| prev.base_folder == record.base_folder)
            .unwrap_or(false);
        let same_file = same_folder
            && previous
                .map(|prev| prev.shapefile_name == record.shapefile_name)
                .unwrap_or(false);

        rows.push(DisplayRow {
            base_folder: if same_folder {
                String::new()
            } else {
                record.base_folder.clone()
            },
            shapefile_name: if same_file {
                String::new()
            } else {
                record.shapefile_name.clone()
            },
            geometry_type: record.geometry_type.clone(),
            field_name: record.field_name.clone(),
            data_type: record.data_type.clone(),
            length: record.length,
            group_start: !same_folder,
        });
        previous = Some(record);
    }

    rows
}
