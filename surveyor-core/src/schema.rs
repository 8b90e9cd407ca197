//! Primary schema extraction for shapefiles.
//!
//! Reads the sidecar `.dbf` attribute table and the `.shp` header without
//! touching record data. Type and geometry names are passed through the way
//! the underlying format declares them.

use std::fmt;
use std::path::{Path, PathBuf};

use shapefile::dbase::{self, FieldInfo, FieldType};
use shapefile::{ShapeReader, ShapeType};

/// A declared attribute field from a shapefile's sidecar table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name as declared in the table.
    pub name: String,
    /// Compound type declaration, `type` or `type:length`.
    pub type_decl: String,
}

/// Schema of one shapefile: nominal geometry plus declared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapefileSchema {
    /// Geometry type declared in the `.shp` header.
    pub geometry_type: String,
    /// Declared attribute fields, in table order.
    pub fields: Vec<FieldDecl>,
}

/// Failure while reading the primary schema of a shapefile.
#[derive(Debug)]
pub enum SchemaError {
    /// The sidecar `.dbf` table does not exist next to the `.shp` file.
    MissingTable(PathBuf),
    /// The sidecar table could not be parsed.
    Table(dbase::Error),
    /// The `.shp` header could not be parsed.
    Shape(shapefile::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable(path) => write!(f, "missing sidecar table {}", path.display()),
            Self::Table(err) => write!(f, "attribute table: {err}"),
            Self::Shape(err) => write!(f, "shape header: {err}"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Read the declared schema of the shapefile at `shp_path`.
pub fn read_schema(shp_path: &Path) -> Result<ShapefileSchema, SchemaError> {
    let table_path = sidecar_table_path(shp_path)
        .ok_or_else(|| SchemaError::MissingTable(shp_path.with_extension("dbf")))?;
    let table = dbase::Reader::from_path(&table_path).map_err(SchemaError::Table)?;
    let fields = table
        .fields()
        .iter()
        .map(|info| FieldDecl {
            name: info.name().to_string(),
            type_decl: declared_type(info),
        })
        .collect();

    let reader = ShapeReader::from_path(shp_path).map_err(SchemaError::Shape)?;
    let geometry_type = geometry_type_name(reader.header().shape_type).to_string();

    Ok(ShapefileSchema {
        geometry_type,
        fields,
    })
}

/// Split a compound `type:length` declaration into its parts.
///
/// A declaration without a length, or with an unparsable one, yields 0.
pub fn parse_type_decl(decl: &str) -> (String, u64) {
    match decl.split_once(':') {
        Some((data_type, length)) => (data_type.to_string(), length.parse().unwrap_or(0)),
        None => (decl.to_string(), 0),
    }
}

/// Display name for a shape type, shared by the header and data tiers.
pub fn geometry_type_name(shape_type: ShapeType) -> &'static str {
    match shape_type {
        ShapeType::NullShape => "Unknown",
        ShapeType::Point | ShapeType::PointM | ShapeType::PointZ => "Point",
        ShapeType::Polyline | ShapeType::PolylineM | ShapeType::PolylineZ => "LineString",
        ShapeType::Polygon | ShapeType::PolygonM | ShapeType::PolygonZ => "Polygon",
        ShapeType::Multipoint | ShapeType::MultipointM | ShapeType::MultipointZ => "MultiPoint",
        ShapeType::Multipatch => "MultiPatch",
    }
}

fn declared_type(info: &FieldInfo) -> String {
    render_type(info.field_type(), info.length())
}

fn render_type(field_type: FieldType, length: u8) -> String {
    match field_type {
        FieldType::Character => format!("str:{length}"),
        FieldType::Memo => "str".to_string(),
        FieldType::Numeric => format!("int:{length}"),
        FieldType::Integer => "int".to_string(),
        FieldType::Float => format!("float:{length}"),
        FieldType::Double | FieldType::Currency => "float".to_string(),
        FieldType::Logical => "bool".to_string(),
        FieldType::Date => "date".to_string(),
        FieldType::DateTime => "datetime".to_string(),
    }
}

fn sidecar_table_path(shp_path: &Path) -> Option<PathBuf> {
    // Sidecars in the wild use either casing for the extension.
    for extension in ["dbf", "DBF"] {
        let candidate = shp_path.with_extension(extension);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
