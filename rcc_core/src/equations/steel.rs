//! Steel area and percentage metrics
//!
//! Both metrics express how much of a reference ceiling the selected design
//! leaves unused:
//!
//! ```text
//! A(d)      = π d² / 4
//! Ast_used  = n_tension × A(d_tension)
//! Ast_max   = 6 × A(25)
//! %Ast      = (Ast_max - Ast_used) / Ast_max × 100
//!
//! D_max     = span / 6
//! %Area     = (D_max - D) / D_max × 100            (DepthOnly)
//! %Area     = ((D_max - D) / D_max + %Ast) / 2     (AveragedWithAst)
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::sizes::MAX_MAIN_BAR_DIA_MM;

use super::round2;

/// Bar count of the reference ceiling
const REFERENCE_BAR_COUNT: f64 = 6.0;

/// Span/depth ratio of the reference maximum depth
const MAX_DEPTH_DIVISOR: f64 = 6.0;

/// How the area percentage is derived.
///
/// `DepthOnly` is the standard formula. `AveragedWithAst` reproduces the
/// legacy variant that averages the depth fraction with the steel percentage;
/// note it mixes a 0-1 fraction with a 0-100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PctAreaPolicy {
    #[default]
    DepthOnly,
    AveragedWithAst,
}

impl PctAreaPolicy {
    pub const ALL: [PctAreaPolicy; 2] = [PctAreaPolicy::DepthOnly, PctAreaPolicy::AveragedWithAst];

    /// Kebab-case name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            PctAreaPolicy::DepthOnly => "depth-only",
            PctAreaPolicy::AveragedWithAst => "averaged-with-ast",
        }
    }
}

impl fmt::Display for PctAreaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PctAreaPolicy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "depth-only" => Ok(PctAreaPolicy::DepthOnly),
            "averaged-with-ast" => Ok(PctAreaPolicy::AveragedWithAst),
            _ => Err(CalcError::invalid_input(
                "pct_area_policy",
                s,
                "Expected depth-only or averaged-with-ast",
            )),
        }
    }
}

/// Cross-sectional area of one bar in mm²
pub fn steel_area_mm2(dia_mm: u32) -> f64 {
    let d = f64::from(dia_mm);
    PI * d * d / 4.0
}

/// Reference ceiling: six bars of the largest main diameter (mm²)
pub fn reference_max_area_mm2() -> f64 {
    REFERENCE_BAR_COUNT * steel_area_mm2(MAX_MAIN_BAR_DIA_MM)
}

/// Reference maximum depth for a span (m)
pub fn max_depth_m(span_m: f64) -> f64 {
    span_m / MAX_DEPTH_DIVISOR
}

/// Percentage of the reference steel area left unused.
///
/// # Example
/// ```
/// use rcc_core::equations::pct_ast;
///
/// // 4 bars of 16 mm against 6 bars of 25 mm
/// assert_eq!(pct_ast(4, 16), 72.69);
/// ```
pub fn pct_ast(tension_bars: u32, tension_dia_mm: u32) -> f64 {
    let ast_used = f64::from(tension_bars) * steel_area_mm2(tension_dia_mm);
    let ast_max = reference_max_area_mm2();
    round2((ast_max - ast_used) / ast_max * 100.0)
}

/// Percentage of the reference depth saved, per `policy`.
///
/// `pct_ast` is only consulted by [`PctAreaPolicy::AveragedWithAst`].
pub fn pct_area(span_m: f64, depth_m: f64, pct_ast: f64, policy: PctAreaPolicy) -> f64 {
    let depth_max = max_depth_m(span_m);
    let saved_fraction = (depth_max - depth_m) / depth_max;
    match policy {
        PctAreaPolicy::DepthOnly => round2(saved_fraction * 100.0),
        PctAreaPolicy::AveragedWithAst => round2((saved_fraction + pct_ast) / 2.0),
    }
}
