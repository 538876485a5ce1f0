//! Marker set: the per-chromosome interval list the joiner queries markers
//! against.
//!
//! Marker-status/type/feature-qualifier/organism filtering is applied
//! upstream by the (out-of-scope) marker location cache; the TSV this module
//! reads is already filtered the way that cache is documented to filter.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::err::AppError;

/// Strand orientation of a marker interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
    /// Covers the `null`, empty-string, and literal `.` placeholder forms
    /// different upstream providers use; all three are treated identically.
    Unknown,
}

impl Strand {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "+" => Strand::Plus,
            "-" => Strand::Minus,
            _ => Strand::Unknown,
        }
    }
}

/// One genomic marker interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    pub marker_key: i64,
    pub accession: String,
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
}

/// Source of marker intervals for one chromosome at a time.
///
/// Modeled as a trait, mirroring `SnpCoordinateSource`, so the real
/// (out-of-scope) marker location cache can be substituted for a
/// file-backed or in-memory implementation in tests.
pub trait MarkerLocationSource {
    /// Markers on `chrom`. Order is unspecified; the joiner does not rely
    /// on marker iteration order, only on the chromosome-list order of the
    /// overall run.
    fn markers(&self, chrom: &str) -> Result<Vec<MarkerRecord>, AppError>;
}

#[derive(Debug, Deserialize)]
struct Row {
    marker_key: i64,
    accession: String,
    #[allow(dead_code)]
    chromosome: String,
    start: i64,
    end: i64,
    strand: String,
}

/// Flattened per-chromosome TSV projection of the marker location cache.
pub struct TsvMarkerSource {
    dir: PathBuf,
    prefix: String,
}

impl TsvMarkerSource {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    fn path_for(&self, chrom: &str) -> PathBuf {
        self.dir.join(format!("{}.{}.tsv", self.prefix, chrom))
    }
}

impl MarkerLocationSource for TsvMarkerSource {
    fn markers(&self, chrom: &str) -> Result<Vec<MarkerRecord>, AppError> {
        let path = self.path_for(chrom);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_path(&path)
            .map_err(|e| AppError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?;

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<Row>().enumerate() {
            let row = result.map_err(|e| AppError::Parse {
                path: path.clone(),
                line: idx + 1,
                message: e.to_string(),
            })?;
            records.push(MarkerRecord {
                marker_key: row.marker_key,
                accession: row.accession,
                start: row.start,
                end: row.end,
                strand: Strand::parse(&row.strand),
            });
        }

        Ok(records)
    }
}
