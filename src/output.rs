//! Output writer: formats association rows and allocates primary keys.
//!
//! The pk counter is an explicit generator value threaded through the
//! writer rather than ambient/global state, so it can be rebased per
//! chromosome under parallel execution.

use std::io::Write;

use crate::classify::Direction;

/// One emitted association row, pre-formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub snp_key: i64,
    pub marker_key: i64,
    pub fxn_key: i64,
    pub coord_cache_key: i64,
    pub distance: i64,
    pub direction: Direction,
}

/// Monotonically increasing primary-key allocator, starting at a caller-
/// supplied value so a chromosome can be assigned a pre-computed, non-
/// overlapping range under the parallel pipeline.
#[derive(Debug, Clone)]
pub struct PkGenerator {
    next: i64,
}

impl PkGenerator {
    /// A generator whose first allocated pk is `start` (1 on cold start).
    pub fn starting_at(start: i64) -> Self {
        Self { next: start }
    }

    /// Allocate and return the next pk.
    pub fn next(&mut self) -> i64 {
        let pk = self.next;
        self.next += 1;
        pk
    }

    /// The next pk that would be allocated, i.e. `start + rows_written`.
    pub fn peek(&self) -> i64 {
        self.next
    }
}

/// Write one association row, allocating its pk from `pks`.
///
/// Format: `pk|snp-key|marker-key|fxn-key|coord-cache-key|||||distance|direction|`
/// (five reserved empty columns between `coord-cache-key` and `distance`).
pub fn write_row<W: Write>(
    out: &mut W,
    pks: &mut PkGenerator,
    assoc: &Association,
) -> std::io::Result<()> {
    let pk = pks.next();
    writeln!(
        out,
        "{}|{}|{}|{}|{}|||||{}|{}|",
        pk,
        assoc.snp_key,
        assoc.marker_key,
        assoc.fxn_key,
        assoc.coord_cache_key,
        assoc.distance,
        assoc.direction.as_str(),
    )
}
