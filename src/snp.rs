//! SNP stream: the per-chromosome ordered list of consensus SNPs the joiner
//! binary-searches against.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::err::AppError;

/// One consensus SNP coordinate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub snp_key: i64,
    pub coord_cache_key: i64,
    pub accession: String,
    pub coordinate: i64,
}

/// Source of ordered SNP coordinates for one chromosome at a time.
///
/// Modeled as a trait so the real (out-of-scope) coordinate cache can be
/// substituted for a file-backed or in-memory implementation in tests.
pub trait SnpCoordinateSource {
    /// SNPs on `chrom`, sorted ascending by `coordinate` (stable: ties
    /// preserve the order the underlying source returned them in).
    fn snps(&self, chrom: &str) -> Result<Vec<SnpRecord>, AppError>;

    /// The maximum coordinate among SNPs on `chrom`, or `None` if there are
    /// none.
    fn max_coordinate(&self, chrom: &str) -> Result<Option<i64>, AppError> {
        Ok(self.snps(chrom)?.last().map(|s| s.coordinate))
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    snp_key: i64,
    coord_cache_key: i64,
    accession: String,
    #[allow(dead_code)]
    chromosome: String,
    coordinate: i64,
}

/// Flattened per-chromosome TSV projection of the SNP coordinate cache.
pub struct TsvSnpSource {
    dir: PathBuf,
    prefix: String,
}

impl TsvSnpSource {
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

impl SnpCoordinateSource for TsvSnpSource {
    fn snps(&self, chrom: &str) -> Result<Vec<SnpRecord>, AppError> {
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
            records.push(SnpRecord {
                snp_key: row.snp_key,
                coord_cache_key: row.coord_cache_key,
                accession: row.accession,
                coordinate: row.coordinate,
            });
        }

        records.sort_by_key(|r| r.coordinate);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_stream() {
        let src = TsvSnpSource::new("/nonexistent", "snpcoord");
        assert_eq!(Vec::<SnpRecord>::new(), src.snps("1").unwrap());
        assert_eq!(None, src.max_coordinate("1").unwrap());
    }

    #[test]
    fn sorts_ascending_and_is_stable_on_ties() {
        let dir = temp_testdir::TempDir::default();
        let path = dir.join("snpcoord.1.tsv");
        std::fs::write(
            &path,
            "snp_key\tcoord_cache_key\taccession\tchromosome\tcoordinate\n\
             3\t300\trs3\t1\t100\n\
             1\t100\trs1\t1\t50\n\
             2\t200\trs2\t1\t100\n",
        )
        .unwrap();

        let src = TsvSnpSource::new(&dir, "snpcoord");
        let snps = src.snps("1").unwrap();
        let coords: Vec<i64> = snps.iter().map(|s| s.coordinate).collect();
        assert_eq!(vec![50, 100, 100], coords);
        // Ties preserve input order: rs3 (snp_key 3) appeared before rs2 (snp_key 2).
        assert_eq!("rs3", snps[1].accession);
        assert_eq!("rs2", snps[2].accession);

        assert_eq!(Some(100), src.max_coordinate("1").unwrap());
    }
}
