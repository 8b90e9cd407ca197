#![deny(missing_docs)]
//! Surveyor core library.
//!
//! This crate contains the domain types and extraction primitives behind the
//! surveyor shapefile auditing tool: a recursive directory scan that collects
//! per-field schema metadata from every shapefile and renders it as a
//! formatted spreadsheet report.

pub mod domain;
pub mod error;
pub mod fs;
pub mod inspector;
pub mod refine;
pub mod report;
pub mod schema;
pub mod xlsx;

pub use domain::{FieldRecord, NO_ATTRIBUTES_FIELD, ScanSummary};
pub use error::{Result, SurveyorError};
pub use fs::{FileSystem, StdFileSystem};
pub use inspector::{ScanOutcome, ScanProgress, ShapefileInspector};
pub use refine::{Refinement, refine};
pub use report::{DisplayRow, REPORT_HEADERS, ReportTable, render_json};
pub use schema::{FieldDecl, SchemaError, ShapefileSchema, parse_type_decl, read_schema};
pub use xlsx::{SHEET_NAME, render_workbook};
