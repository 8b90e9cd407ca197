//! Domain entities for surveyor.

use serde::{Deserialize, Serialize};

/// Field name recorded for shapefiles that declare no attribute fields.
pub const NO_ATTRIBUTES_FIELD: &str = "(Sin atributos)";

/// A single audited attribute field of a shapefile.
///
/// Records are flat and never mutated after creation; one shapefile
/// contributes one record per declared field, or a single placeholder
/// record when the attribute table is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Directory containing the shapefile.
    pub base_folder: String,
    /// File name of the shapefile.
    pub shapefile_name: String,
    /// Dominant geometry type, falling back to the declared one.
    pub geometry_type: String,
    /// Declared field name.
    pub field_name: String,
    /// Declared field type (for example `str` or `int`).
    pub data_type: String,
    /// Declared field length, or the maximum observed character length
    /// when no length was declared.
    pub length: u64,
}

/// Headline metrics for a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Total number of field records collected.
    pub field_records: usize,
    /// Number of distinct shapefiles that contributed records.
    pub shapefiles: usize,
    /// Number of distinct base folders that contributed records.
    pub base_folders: usize,
}
