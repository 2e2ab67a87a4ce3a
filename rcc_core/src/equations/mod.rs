//! # Design Equations
//!
//! The closed-form rules applied after a design row has been selected.
//! Keeping them here lets each rule be checked on its own.
//!
//! ## Modules
//!
//! - [`depth`] - Span/depth ratio rule per support condition
//! - [`steel`] - Bar areas and the two percentage metrics
//!
//! ## Units
//!
//! - Spans and depths in metres
//! - Bar diameters in millimetres, areas in mm²
//! - Percentages on a 0-100 scale, rounded to two decimals

pub mod depth;
pub mod steel;

pub use depth::{depth_divisor, effective_depth_m};
pub use steel::{max_depth_m, pct_area, pct_ast, reference_max_area_mm2, steel_area_mm2, PctAreaPolicy};

/// Round to two decimal places.
///
/// Rounds the exact binary value of `value`, and exact ties go to the
/// even digit. `5.1 / 12.0` is stored as 0.42499999... and gives 0.42,
/// and the tie 0.125 gives 0.12. Scaling by 100 first would round both up.
///
/// ```
/// use rcc_core::equations::round2;
/// assert_eq!(round2(0.857142), 0.86);
/// assert_eq!(round2(72.6933), 72.69);
/// assert_eq!(round2(2.675), 2.67);
/// ```
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
