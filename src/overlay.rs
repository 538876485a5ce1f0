//! Overlay loader: per-chromosome externally-curated (SNP, marker) ->
//! function-class overrides that supersede the geometric joiner.

use std::collections::HashMap;
use std::path::Path;

use crate::common::io::read_lines;
use crate::err::AppError;

/// One externally-curated function-class assignment for a (SNP, marker) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    pub term_key: i64,
    pub canonical_term: String,
}

/// Mapping `(snp-accession, marker-accession) -> ordered overlay entries`,
/// built fresh for one chromosome and discarded once that chromosome's join
/// completes.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    by_pair: HashMap<(String, String), Vec<OverlayEntry>>,
}

impl Overlay {
    /// Load the overlay TSV for one chromosome. A missing file is not an
    /// error; it yields an empty overlay.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(Self::default());
        }

        let lines = read_lines(path).map_err(|e| AppError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut by_pair: HashMap<(String, String), Vec<OverlayEntry>> = HashMap::new();
        for (idx, line) in lines.enumerate() {
            let line = line.map_err(|e| AppError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('|').collect();
            if fields.len() != 6 {
                tracing::debug!(
                    "skipping overlay line {} in {:?}: expected 6 fields, got {}",
                    idx + 1,
                    path,
                    fields.len()
                );
                continue;
            }
            let snp_accession = fields[0].to_string();
            let marker_accession = fields[1].to_string();
            let canonical_term = fields[5].to_string();
            let term_key = fields[4].parse::<i64>().map_err(|_| AppError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("non-integer term-key {:?}", fields[4]),
            })?;

            by_pair
                .entry((snp_accession, marker_accession))
                .or_default()
                .push(OverlayEntry {
                    term_key,
                    canonical_term,
                });
        }

        Ok(Self { by_pair })
    }

    /// Look up the overlay entries for one (SNP, marker) pair, if any.
    pub fn lookup(&self, snp_accession: &str, marker_accession: &str) -> Option<&[OverlayEntry]> {
        self.by_pair
            .get(&(snp_accession.to_string(), marker_accession.to_string()))
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_overlay() {
        let overlay = Overlay::load("/nonexistent/path/overlay.tsv").unwrap();
        assert!(overlay.is_empty());
    }

    #[test]
    fn loads_multiple_entries_for_the_same_pair() {
        let dir = temp_testdir::TempDir::default();
        let path = dir.join("overlay.tsv");
        std::fs::write(
            &path,
            "rs1|MGI:10|Sym1|raw term a|7001|canonical a\nrs1|MGI:10|Sym1|raw term b|7002|canonical b\n",
        )
        .unwrap();

        let overlay = Overlay::load(&path).unwrap();
        let entries = overlay.lookup("rs1", "MGI:10").unwrap();
        assert_eq!(2, entries.len());
        assert_eq!(7001, entries[0].term_key);
        assert_eq!(7002, entries[1].term_key);
    }

    #[test]
    fn skips_lines_with_wrong_field_count() {
        let dir = temp_testdir::TempDir::default();
        let path = dir.join("overlay.tsv");
        std::fs::write(&path, "rs1|MGI:10|only|three\nrs2|MGI:20|Sym2|raw|7003|canonical\n").unwrap();

        let overlay = Overlay::load(&path).unwrap();
        assert!(overlay.lookup("rs1", "MGI:10").is_none());
        assert!(overlay.lookup("rs2", "MGI:20").is_some());
    }

    #[tracing_test::traced_test]
    #[test]
    fn skipped_line_does_not_abort_the_load() {
        let dir = temp_testdir::TempDir::default();
        let path = dir.join("overlay.tsv");
        std::fs::write(&path, "rs1|MGI:10|only|three\nrs2|MGI:20|Sym2|raw|7003|canonical\n").unwrap();

        let overlay = Overlay::load(&path).unwrap();
        assert_eq!(1, overlay.len());
    }

    #[test]
    fn malformed_term_key_is_parse_error() {
        let dir = temp_testdir::TempDir::default();
        let path = dir.join("overlay.tsv");
        std::fs::write(&path, "rs1|MGI:10|Sym1|raw|not-a-number|canonical\n").unwrap();

        let err = Overlay::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }
}
