//! Proximity joiner: for each marker, binary-search the SNP list for the
//! rightmost in-range SNP, then scan leftward while still in range.

use crate::classify::classify;
use crate::marker::MarkerRecord;
use crate::output::Association;
use crate::overlay::Overlay;
use crate::snp::SnpRecord;
use crate::vocab::Vocabulary;

/// Run the join for one chromosome, calling `emit` once per association row
/// in joiner order (marker-iteration order, then backwards-SNP-index).
///
/// `snps` must already be sorted ascending by coordinate (`SnpCoordinateSource`
/// guarantees this).
pub fn join_chromosome<F>(
    chromosome: &str,
    snps: &[SnpRecord],
    markers: &[MarkerRecord],
    pad: i64,
    overlay: &Overlay,
    vocab: &Vocabulary,
    mut emit: F,
) where
    F: FnMut(Association),
{
    if snps.is_empty() || markers.is_empty() {
        return;
    }

    for marker in markers {
        let right_bound = marker.end + pad;
        let left_bound = marker.start - pad;

        // Largest index i such that snps[i].coordinate <= right_bound.
        let count = snps.partition_point(|s| s.coordinate <= right_bound);
        if count == 0 {
            continue;
        }
        let hi = count - 1;

        let mut i = hi;
        loop {
            let snp = &snps[i];
            if snp.coordinate < left_bound {
                break;
            }
            for assoc in classify(chromosome, snp, marker, overlay, vocab) {
                emit(assoc);
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
    }
}
