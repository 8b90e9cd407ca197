//! Secondary data scan refining the declared schema.
//!
//! Re-opens a shapefile with the full reader to learn what the data actually
//! contains: the dominant geometry type across records and the maximum
//! observed character length per text field. This tier is best-effort; any
//! read failure drops the whole refinement and the declared schema stands.

use std::collections::BTreeMap;
use std::path::Path;

use shapefile::Shape;
use shapefile::dbase::FieldValue;

use crate::schema;

/// Facts observed by scanning actual shapefile data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refinement {
    /// Most frequent geometry type over non-null records, ties resolved
    /// toward the lexicographically smallest name.
    pub dominant_geometry: Option<String>,
    /// Maximum observed character count per text field, for fields with at
    /// least one non-null value.
    pub max_char_lengths: BTreeMap<String, u64>,
}

/// Scan the records of the shapefile at `shp_path`.
///
/// Returns `None` when the file cannot be fully read; the caller keeps the
/// schema-only result.
pub fn refine(shp_path: &Path) -> Option<Refinement> {
    let mut reader = shapefile::Reader::from_path(shp_path).ok()?;
    let mut geometry_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut max_char_lengths: BTreeMap<String, u64> = BTreeMap::new();

    for entry in reader.iter_shapes_and_records() {
        let (shape, record) = match entry {
            Ok(pair) => pair,
            Err(err) => {
                log::debug!("data scan failed for {}: {err}", shp_path.display());
                return None;
            }
        };

        if !matches!(shape, Shape::NullShape) {
            let name = schema::geometry_type_name(shape.shapetype());
            *geometry_counts.entry(name.to_string()).or_insert(0) += 1;
        }

        for (field_name, value) in record {
            let observed = match value {
                FieldValue::Character(Some(text)) => char_count(&text),
                FieldValue::Memo(text) => char_count(&text),
                _ => continue,
            };
            let entry = max_char_lengths.entry(field_name).or_insert(0);
            if observed > *entry {
                *entry = observed;
            }
        }
    }

    Some(Refinement {
        dominant_geometry: dominant(&geometry_counts),
        max_char_lengths,
    })
}

fn char_count(text: &str) -> u64 {
    text.chars().count() as u64
}

fn dominant(counts: &BTreeMap<String, u64>) -> Option<String> {
    let mut best: Option<(&str, u64)> = None;
    for (name, count) in counts {
        match best {
            // Strictly greater keeps the smallest name on ties.
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((name, *count)),
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{char_count, dominant, refine};
    use std::collections::BTreeMap;
    use std::path::Path;

    #[test]
    fn dominant_picks_highest_count() {
        let mut counts = BTreeMap::new();
        counts.insert("LineString".to_string(), 2);
        counts.insert("Point".to_string(), 5);
        assert_eq!(dominant(&counts), Some("Point".to_string()));
    }

    #[test]
    fn dominant_tie_resolves_to_smallest_name() {
        let mut counts = BTreeMap::new();
        counts.insert("Polygon".to_string(), 3);
        counts.insert("Point".to_string(), 3);
        assert_eq!(dominant(&counts), Some("Point".to_string()));
    }

    #[test]
    fn dominant_of_nothing_is_none() {
        assert_eq!(dominant(&BTreeMap::new()), None);
    }

    #[test]
    fn char_count_counts_scalar_values() {
        assert_eq!(char_count("Bogotá"), 6);
        assert_eq!(char_count(""), 0);
    }

    #[test]
    fn unreadable_file_yields_none() {
        assert_eq!(refine(Path::new("/nonexistent/lotes.shp")), None);
    }
}
