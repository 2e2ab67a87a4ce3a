//! Span/depth rule
//!
//! Effective depth is taken as span divided by a ratio that depends on the
//! support condition, erring on the deep side:
//!
//! | Beam type        | span / depth |
//! |------------------|--------------|
//! | Simply supported | 10           |
//! | Cantilever       | 7            |
//! | Continuous       | 12           |

use crate::beam_type::BeamType;

use super::round2;

/// Span-to-depth divisor for a support condition
pub fn depth_divisor(beam_type: BeamType) -> f64 {
    match beam_type {
        BeamType::SimplySupported => 10.0,
        BeamType::Cantilever => 7.0,
        BeamType::Continuous => 12.0,
    }
}

/// Effective depth in metres, rounded to two decimals.
///
/// # Example
/// ```
/// use rcc_core::beam_type::BeamType;
/// use rcc_core::equations::effective_depth_m;
///
/// assert_eq!(effective_depth_m(6.0, BeamType::SimplySupported), 0.6);
/// assert_eq!(effective_depth_m(6.0, BeamType::Continuous), 0.5);
/// ```
pub fn effective_depth_m(span_m: f64, beam_type: BeamType) -> f64 {
    round2(span_m / depth_divisor(beam_type))
}
