//! Nearest-row lookup
//!
//! Picks the design row closest to a requested span and width within one
//! beam-type partition. Distance is the L1 norm in (span, width) space:
//!
//! ```text
//! score = |row.span - span| + |row.width - width|
//! ```
//!
//! Ties go to the row that appears first in the table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beam_type::BeamType;
use crate::dataset::DesignRow;
use crate::errors::{CalcError, CalcResult};

/// A selected row together with where it sits in the table and how far it is
/// from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMatch<'a> {
    /// Position of the row in the full table
    pub index: usize,
    /// L1 distance from the query
    pub score: f64,
    /// The selected row
    pub row: &'a DesignRow,
}

/// Serializable summary of a [`RowMatch`], reported with design results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub row_index: usize,
    pub score: f64,
    pub row_span_m: f64,
    pub row_width_m: f64,
}

impl From<&RowMatch<'_>> for MatchInfo {
    fn from(m: &RowMatch<'_>) -> Self {
        MatchInfo {
            row_index: m.index,
            score: m.score,
            row_span_m: m.row.span_m,
            row_width_m: m.row.width_m,
        }
    }
}

/// L1 distance between a row and a (span, width) query
pub fn score(row: &DesignRow, span_m: f64, width_m: f64) -> f64 {
    (row.span_m - span_m).abs() + (row.width_m - width_m).abs()
}

/// Find the row of `beam_type` nearest to `span_m` x `width_m`.
///
/// # Errors
///
/// * `CalcError::NoMatchingRow` - no row has the requested beam type
///
/// # Example
///
/// ```rust
/// use rcc_core::beam_type::BeamType;
/// use rcc_core::dataset::Dataset;
/// use rcc_core::selector::nearest_row;
///
/// let rows = Dataset::builtin().rows();
/// let found = nearest_row(rows, BeamType::SimplySupported, 5.2, 0.30).unwrap();
/// assert_eq!(found.row.span_m, 5.0);
/// assert_eq!(found.row.tension_dia_mm, 12);
/// ```
pub fn nearest_row(
    rows: &[DesignRow],
    beam_type: BeamType,
    span_m: f64,
    width_m: f64,
) -> CalcResult<RowMatch<'_>> {
    let mut best: Option<RowMatch<'_>> = None;

    for (index, row) in rows.iter().enumerate() {
        if row.beam_type != beam_type {
            continue;
        }
        let candidate = score(row, span_m, width_m);
        // Strict comparison keeps the earliest row on ties
        if best.map_or(true, |b| candidate < b.score) {
            best = Some(RowMatch {
                index,
                score: candidate,
                row,
            });
        }
    }

    let found = best.ok_or_else(|| CalcError::no_matching_row(beam_type))?;
    debug!(
        beam_type = %beam_type,
        span_m,
        width_m,
        row_index = found.index,
        score = found.score,
        "selected nearest design row"
    );
    Ok(found)
}
