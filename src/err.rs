//! Error taxonomy for the worker.
//!
//! Follows the teacher's convention of a small `thiserror`-derived enum for
//! errors that callers need to match on, with `anyhow::Error` used at the
//! outer boundary (`main`) for everything else.

use std::path::PathBuf;

/// Fatal or chromosome-scoped error kinds produced by the worker.
///
/// `EmptyChromosome` is intentionally absent here: a missing overlay file or
/// an empty SNP list for a chromosome is not an error, it is represented by
/// an `Ok` result carrying zero rows.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Missing required vocabulary term, or an output directory that cannot
    /// be created. Fatal; aborts the run before any output is produced.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed overlay line (non-integer term key). Fatal for the
    /// chromosome being parsed.
    #[error("parse error in {path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Read/write failure on an overlay or output file.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal classifier fall-through: none of the strand/direction rules
/// matched. Logged as a warning and the row is dropped; never propagated
/// as an error.
#[derive(Debug, Clone)]
pub struct DataError {
    pub chromosome: String,
    pub snp_accession: String,
    pub marker_accession: String,
    pub reason: &'static str,
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unreachable classifier fall-through on chr{} for ({}, {}): {}",
            self.chromosome, self.snp_accession, self.marker_accession, self.reason
        )
    }
}
