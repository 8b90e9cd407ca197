//! Shapefile discovery and metadata extraction.

use std::path::Path;

use crate::domain::{FieldRecord, NO_ATTRIBUTES_FIELD};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::refine::{self, Refinement};
use crate::schema::{self, ShapefileSchema};

/// Progress of an ongoing scan, reported once per visited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress<'a> {
    /// Files visited so far, including non-shapefiles.
    pub processed: usize,
    /// Total files under the scan root.
    pub total: usize,
    /// Name of the shapefile being processed, when the current file is one.
    pub current_shapefile: Option<&'a str>,
}

/// Outcome of a directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Field records collected from every readable shapefile.
    pub records: Vec<FieldRecord>,
    /// One warning per shapefile whose schema could not be read.
    pub warnings: Vec<String>,
}

/// Walks a directory tree and extracts schema metadata from every shapefile.
pub struct ShapefileInspector<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> ShapefileInspector<F> {
    /// Create a new inspector over the given filesystem.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Scan without progress reporting.
    pub fn inspect(&self, root: &Path) -> Result<ScanOutcome> {
        self.inspect_with_progress(root, &mut |_| {})
    }

    /// Scan the tree under `root`, invoking `progress` once per visited file.
    ///
    /// A shapefile whose schema cannot be read contributes zero records and
    /// exactly one warning; the scan always continues.
    pub fn inspect_with_progress(
        &self,
        root: &Path,
        progress: &mut dyn FnMut(ScanProgress<'_>),
    ) -> Result<ScanOutcome> {
        let files = self.fs.list_files(root)?;
        let total = files.len();
        let mut outcome = ScanOutcome::default();

        for (index, path) in files.iter().enumerate() {
            let name = file_name(path);
            let is_shapefile = has_shp_extension(path);
            progress(ScanProgress {
                processed: index + 1,
                total,
                current_shapefile: is_shapefile.then_some(name),
            });
            if !is_shapefile {
                continue;
            }

            let schema = match schema::read_schema(path) {
                Ok(schema) => schema,
                Err(err) => {
                    let warning = format!("schema read failed for {name}: {err}");
                    log::warn!("{warning}");
                    outcome.warnings.push(warning);
                    continue;
                }
            };

            let refinement = refine::refine(path);
            let base_folder = parent_folder(path);
            outcome
                .records
                .append(&mut build_records(&base_folder, name, &schema, refinement.as_ref()));
        }

        Ok(outcome)
    }
}

/// Assemble the field records for one shapefile.
fn build_records(
    base_folder: &str,
    shapefile_name: &str,
    schema: &ShapefileSchema,
    refinement: Option<&Refinement>,
) -> Vec<FieldRecord> {
    let geometry_type = refinement
        .and_then(|facts| facts.dominant_geometry.clone())
        .unwrap_or_else(|| schema.geometry_type.clone());

    if schema.fields.is_empty() {
        return vec![FieldRecord {
            base_folder: base_folder.to_string(),
            shapefile_name: shapefile_name.to_string(),
            geometry_type,
            field_name: NO_ATTRIBUTES_FIELD.to_string(),
            data_type: String::new(),
            length: 0,
        }];
    }

    schema
        .fields
        .iter()
        .map(|field| {
            let (data_type, declared_length) = schema::parse_type_decl(&field.type_decl);
            let observed = refinement.and_then(|facts| facts.max_char_lengths.get(&field.name).copied());
            FieldRecord {
                base_folder: base_folder.to_string(),
                shapefile_name: shapefile_name.to_string(),
                geometry_type: geometry_type.clone(),
                field_name: field.name.clone(),
                data_type,
                length: resolved_length(declared_length, observed),
            }
        })
        .collect()
}

/// Observed length only stands in when no length was declared.
fn resolved_length(declared: u64, observed: Option<u64>) -> u64 {
    if declared == 0 {
        observed.unwrap_or(0)
    } else {
        declared
    }
}

fn has_shp_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("shp"))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}

fn parent_folder(path: &Path) -> String {
    path.parent()
        .map(|parent| parent.display().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{ScanProgress, ShapefileInspector, build_records, has_shp_extension, resolved_length};
    use crate::domain::NO_ATTRIBUTES_FIELD;
    use crate::fs::MockFileSystem;
    use crate::refine::Refinement;
    use crate::schema::{FieldDecl, ShapefileSchema};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    fn schema_with(fields: Vec<(&str, &str)>) -> ShapefileSchema {
        ShapefileSchema {
            geometry_type: "Polygon".to_string(),
            fields: fields
                .into_iter()
                .map(|(name, type_decl)| FieldDecl {
                    name: name.to_string(),
                    type_decl: type_decl.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn declared_type_and_length_are_preserved() {
        let schema = schema_with(vec![("name", "str:10"), ("pop", "int")]);
        let records = build_records("/data", "cities.shp", &schema, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field_name, "name");
        assert_eq!(records[0].data_type, "str");
        assert_eq!(records[0].length, 10);
        assert_eq!(records[1].field_name, "pop");
        assert_eq!(records[1].data_type, "int");
        assert_eq!(records[1].length, 0);
    }

    #[test]
    fn observed_length_fills_in_undeclared_length() {
        let schema = schema_with(vec![("comment", "str:0")]);
        let mut max_char_lengths = BTreeMap::new();
        max_char_lengths.insert("comment".to_string(), 7);
        let refinement = Refinement {
            dominant_geometry: None,
            max_char_lengths,
        };

        let records = build_records("/data", "lotes.shp", &schema, Some(&refinement));
        assert_eq!(records[0].length, 7);
    }

    #[test]
    fn declared_length_wins_over_observed() {
        assert_eq!(resolved_length(10, Some(12)), 10);
        assert_eq!(resolved_length(0, Some(7)), 7);
        assert_eq!(resolved_length(0, None), 0);
    }

    #[test]
    fn fieldless_shapefile_emits_placeholder_record() {
        let schema = schema_with(vec![]);
        let records = build_records("/data", "vacio.shp", &schema, None);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field_name, NO_ATTRIBUTES_FIELD);
        assert_eq!(records[0].data_type, "");
        assert_eq!(records[0].length, 0);
        assert_eq!(records[0].geometry_type, "Polygon");
    }

    #[test]
    fn dominant_geometry_overrides_declared_one() {
        let schema = schema_with(vec![("name", "str:10")]);
        let refinement = Refinement {
            dominant_geometry: Some("Point".to_string()),
            max_char_lengths: BTreeMap::new(),
        };

        let records = build_records("/data", "pozos.shp", &schema, Some(&refinement));
        assert_eq!(records[0].geometry_type, "Point");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(has_shp_extension(Path::new("a/PARCELAS.SHP")));
        assert!(has_shp_extension(Path::new("a/parcelas.shp")));
        assert!(!has_shp_extension(Path::new("a/parcelas.dbf")));
        assert!(!has_shp_extension(Path::new("a/parcelas")));
    }

    #[test]
    fn inspect_skips_non_shapefiles() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok(vec![
                PathBuf::from("data/readme.txt"),
                PathBuf::from("data/parcelas.prj"),
            ])
        });

        let inspector = ShapefileInspector::new(fs);
        let outcome = inspector.inspect(Path::new("/data")).expect("inspect");

        assert!(outcome.records.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn unreadable_shapefile_contributes_single_warning() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files()
            .returning(|_| Ok(vec![PathBuf::from("/nonexistent/ghost.shp")]));

        let inspector = ShapefileInspector::new(fs);
        let outcome = inspector.inspect(Path::new("/nonexistent")).expect("inspect");

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("ghost.shp"));
    }

    #[test]
    fn progress_reports_every_visited_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok(vec![
                PathBuf::from("data/readme.txt"),
                PathBuf::from("/nonexistent/ghost.shp"),
            ])
        });

        let inspector = ShapefileInspector::new(fs);
        let mut seen: Vec<(usize, usize, Option<String>)> = Vec::new();
        inspector
            .inspect_with_progress(Path::new("/data"), &mut |progress: ScanProgress<'_>| {
                seen.push((
                    progress.processed,
                    progress.total,
                    progress.current_shapefile.map(str::to_string),
                ));
            })
            .expect("inspect");

        assert_eq!(
            seen,
            vec![
                (1, 2, None),
                (2, 2, Some("ghost.shp".to_string())),
            ]
        );
    }
}
