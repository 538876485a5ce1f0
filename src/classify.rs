//! Classifier: turns one (SNP, marker) pair that already satisfies the
//! proximity predicate into zero or more association rows.

use crate::err::DataError;
use crate::marker::{MarkerRecord, Strand};
use crate::output::Association;
use crate::overlay::Overlay;
use crate::snp::SnpRecord;
use crate::vocab::Vocabulary;

/// Orientation of a SNP relative to a marker interval.
///
/// Internally a tagged variant; the string form (used only at the output-
/// writer boundary) is derived with `strum`, matching the teacher's
/// convention for enum <-> string conversions elsewhere in the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum Direction {
    #[strum(serialize = "upstream")]
    Upstream,
    #[strum(serialize = "downstream")]
    Downstream,
    #[strum(serialize = "proximal")]
    Proximal,
    #[strum(serialize = "distal")]
    Distal,
    #[strum(serialize = "not applicable")]
    NotApplicable,
}

impl Direction {
    /// String form used only at the output-writer boundary.
    pub fn as_str(self) -> &'static str {
        self.as_ref()
    }
}

/// Classify one (SNP, marker) pair known to satisfy `start-PAD <= snp.coord
/// <= end+PAD`. Returns one row per overlay entry on an overlay hit,
/// otherwise at most one geometric row. An empty result with a warning logged
/// means the pair fell through every case, which the joiner's filter should
/// make unreachable.
pub fn classify(
    chromosome: &str,
    snp: &SnpRecord,
    marker: &MarkerRecord,
    overlay: &Overlay,
    vocab: &Vocabulary,
) -> Vec<Association> {
    if let Some(entries) = overlay.lookup(&snp.accession, &marker.accession) {
        return entries
            .iter()
            .map(|entry| Association {
                snp_key: snp.snp_key,
                marker_key: marker.marker_key,
                fxn_key: entry.term_key,
                coord_cache_key: snp.coord_cache_key,
                distance: 0,
                direction: Direction::NotApplicable,
            })
            .collect();
    }

    if marker.start <= snp.coordinate && snp.coordinate <= marker.end {
        let fxn_key = match vocab.resolve(crate::vocab::WITHIN_COORDINATES_OF) {
            Ok(key) => key,
            Err(_) => unreachable!("vocab is validated at load time"),
        };
        return vec![Association {
            snp_key: snp.snp_key,
            marker_key: marker.marker_key,
            fxn_key,
            coord_cache_key: snp.coord_cache_key,
            distance: 0,
            direction: Direction::NotApplicable,
        }];
    }

    if let Some((direction, distance)) = geometry(snp, marker) {
        let fxn_key = match vocab.resolve(crate::vocab::WITHIN_DISTANCE_OF) {
            Ok(key) => key,
            Err(_) => unreachable!("vocab is validated at load time"),
        };
        return vec![Association {
            snp_key: snp.snp_key,
            marker_key: marker.marker_key,
            fxn_key,
            coord_cache_key: snp.coord_cache_key,
            distance,
            direction,
        }];
    }

    let err = DataError {
        chromosome: chromosome.to_string(),
        snp_accession: snp.accession.clone(),
        marker_accession: marker.accession.clone(),
        reason: "pair passed the joiner's proximity filter but matched no classifier case",
    };
    tracing::warn!("{}", err);
    Vec::new()
}

/// Strand-based direction and distance for a SNP outside the marker
/// interval but within the proximity window.
fn geometry(snp: &SnpRecord, marker: &MarkerRecord) -> Option<(Direction, i64)> {
    let mid = (marker.start as f64 + marker.end as f64) / 2.0;
    let before_mid = (snp.coordinate as f64) <= mid;

    match marker.strand {
        Strand::Plus => {
            if before_mid {
                Some((Direction::Upstream, marker.start - snp.coordinate))
            } else {
                Some((Direction::Downstream, snp.coordinate - marker.end))
            }
        }
        Strand::Minus => {
            if before_mid {
                Some((Direction::Downstream, marker.start - snp.coordinate))
            } else {
                Some((Direction::Upstream, snp.coordinate - marker.end))
            }
        }
        Strand::Unknown => {
            if before_mid {
                Some((Direction::Proximal, marker.start - snp.coordinate))
            } else {
                Some((Direction::Distal, snp.coordinate - marker.end))
            }
        }
    }
}
