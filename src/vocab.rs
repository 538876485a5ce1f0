//! Vocabulary loader: resolves term names to term keys for the "SNP Function
//! Class" vocabulary, from a flattened TSV projection (`term | term_key |
//! vocab_name`).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::err::AppError;

pub const WITHIN_COORDINATES_OF: &str = "within coordinates of";
pub const WITHIN_DISTANCE_OF: &str = "within distance of";
pub const LOCUS_REGION: &str = "Locus-Region";

const VOCAB_NAME: &str = "SNP Function Class";

#[derive(Debug, Deserialize)]
struct Row {
    term: String,
    term_key: i64,
    vocab_name: String,
}

/// Resolved term-key mapping for the "SNP Function Class" vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    by_name: HashMap<String, i64>,
}

impl Vocabulary {
    /// Load the vocabulary from a flattened TSV file, then confirm the two
    /// terms the geometric path needs are present.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_path(path)
            .map_err(|e| AppError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?;

        let mut by_name = HashMap::new();
        for result in reader.deserialize::<Row>() {
            let row = result.map_err(|e| AppError::Parse {
                path: path.to_path_buf(),
                line: 0,
                message: e.to_string(),
            })?;
            if row.vocab_name == VOCAB_NAME {
                by_name.insert(row.term, row.term_key);
            }
        }

        let vocab = Self { by_name };
        vocab.resolve(WITHIN_COORDINATES_OF)?;
        vocab.resolve(WITHIN_DISTANCE_OF)?;
        Ok(vocab)
    }

    /// Resolve a term name to its integer key.
    pub fn resolve(&self, name: &str) -> Result<i64, AppError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AppError::Config(format!("required vocabulary term missing: {}", name)))
    }
}
