//! # Beam Reinforcement Estimate
//!
//! Estimates reinforcement for an RCC beam from the design table: picks the
//! nearest precomputed row, snaps its sizes to stocked bars and spacings,
//! applies the span/depth rule and reports how much of the reference
//! depth and steel area the design leaves unused.
//!
//! ## Assumptions
//!
//! - Reinforcement comes from the table only, no section analysis
//! - Concrete and steel grades are recorded but do not change the estimate
//!
//! ## Example
//!
//! ```rust
//! use rcc_core::beam_type::BeamType;
//! use rcc_core::calculations::design::{calculate, DesignQuery};
//! use rcc_core::dataset::Dataset;
//! use rcc_core::settings::DesignSettings;
//!
//! let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.30);
//! let result = calculate(&query, Dataset::builtin(), &DesignSettings::default()).unwrap();
//!
//! assert_eq!(result.tension_dia_mm, 16);
//! assert_eq!(result.tension_bars, 4);
//! assert_eq!(result.depth_m, 0.6);
//! assert_eq!(result.pct_ast, 72.69);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beam_type::BeamType;
use crate::dataset::Dataset;
use crate::equations::{effective_depth_m, pct_area, pct_ast, PctAreaPolicy};
use crate::errors::{CalcError, CalcResult};
use crate::selector::{nearest_row, MatchInfo};
use crate::settings::{DesignSettings, CONCRETE_GRADES, STEEL_GRADES};
use crate::sizes::{round_down, round_up, MAIN_BAR_DIAS_MM, STIRRUP_DIAS_MM, STIRRUP_SPACINGS_MM};

/// Default concrete grade (N/mm²)
pub const DEFAULT_FCK: u32 = 20;

/// Default steel grade (N/mm²)
pub const DEFAULT_FY: u32 = 415;

/// One estimate request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "beam_type": "SimplySupported",
///   "span_m": 6.0,
///   "width_m": 0.30,
///   "fck": 20,
///   "fy": 415
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignQuery {
    /// Support condition
    pub beam_type: BeamType,

    /// Span in metres
    pub span_m: f64,

    /// Beam width in metres
    pub width_m: f64,

    /// Characteristic concrete strength (N/mm²), recorded only
    #[serde(default = "default_fck")]
    pub fck: u32,

    /// Steel yield strength (N/mm²), recorded only
    #[serde(default = "default_fy")]
    pub fy: u32,
}

fn default_fck() -> u32 {
    DEFAULT_FCK
}

fn default_fy() -> u32 {
    DEFAULT_FY
}

impl DesignQuery {
    /// Create a query with the default material grades
    pub fn new(beam_type: BeamType, span_m: f64, width_m: f64) -> Self {
        DesignQuery {
            beam_type,
            span_m,
            width_m,
            fck: DEFAULT_FCK,
            fy: DEFAULT_FY,
        }
    }

    /// Set the material grades
    pub fn with_grades(mut self, fck: u32, fy: u32) -> Self {
        self.fck = fck;
        self.fy = fy;
        self
    }

    /// Validate the query against the bounds in `settings`.
    pub fn validate(&self, settings: &DesignSettings) -> CalcResult<()> {
        check_range("span_m", self.span_m, settings.span_limits_m, "Span")?;
        check_range("width_m", self.width_m, settings.width_limits_m, "Width")?;

        if !CONCRETE_GRADES.contains(&self.fck) {
            return Err(CalcError::invalid_input(
                "fck",
                self.fck.to_string(),
                format!("Concrete grade must be one of {CONCRETE_GRADES:?}"),
            ));
        }
        if !STEEL_GRADES.contains(&self.fy) {
            return Err(CalcError::invalid_input(
                "fy",
                self.fy.to_string(),
                format!("Steel grade must be one of {STEEL_GRADES:?}"),
            ));
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64), label: &str) -> CalcResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{label} must be between {min} and {max} m"),
        ));
    }
    Ok(())
}

/// Estimated reinforcement layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "beam_type": "SimplySupported",
///   "depth_m": 0.6,
///   "tension_bars": 4,
///   "tension_dia_mm": 16,
///   "compression_bars": 3,
///   "compression_dia_mm": 16,
///   "stirrup_dia_mm": 8,
///   "stirrup_spacing_mm": 150,
///   "pct_area": 40.0,
///   "pct_ast": 72.69,
///   "pct_area_policy": "depth_only",
///   "fck": 20,
///   "fy": 415,
///   "matched": { "row_index": 0, "score": 0.0, "row_span_m": 6.0, "row_width_m": 0.3 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Support condition of the query
    pub beam_type: BeamType,

    /// Effective depth in metres
    pub depth_m: f64,

    // === Reinforcement ===
    /// Number of tension bars
    pub tension_bars: u32,

    /// Tension bar diameter in mm (rounded up to a stocked size)
    pub tension_dia_mm: u32,

    /// Number of compression bars
    pub compression_bars: u32,

    /// Compression bar diameter in mm (rounded up to a stocked size)
    pub compression_dia_mm: u32,

    /// Stirrup diameter in mm (rounded up to a stocked size)
    pub stirrup_dia_mm: u32,

    /// Stirrup spacing in mm (rounded down to a stocked spacing)
    pub stirrup_spacing_mm: u32,

    // === Metrics ===
    /// Percentage of the reference depth saved
    pub pct_area: f64,

    /// Percentage of the reference steel area left unused
    pub pct_ast: f64,

    /// Formula used for `pct_area`
    pub pct_area_policy: PctAreaPolicy,

    // === Echoed inputs ===
    pub fck: u32,
    pub fy: u32,

    /// Which table row the estimate came from
    pub matched: MatchInfo,
}

/// Estimate reinforcement for `query` from `dataset`.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - query outside the bounds in `settings`
/// * `CalcError::NoMatchingRow` - the dataset has no row of the query's beam type
pub fn calculate(query: &DesignQuery, dataset: &Dataset, settings: &DesignSettings) -> CalcResult<DesignResult> {
    settings.validate()?;
    query.validate(settings)?;

    let found = nearest_row(dataset.rows(), query.beam_type, query.span_m, query.width_m)?;
    let row = found.row;

    let tension_dia_mm = round_up(row.tension_dia_mm, &MAIN_BAR_DIAS_MM);
    let compression_dia_mm = round_up(row.compression_dia_mm, &MAIN_BAR_DIAS_MM);
    let stirrup_dia_mm = round_up(row.stirrup_dia_mm, &STIRRUP_DIAS_MM);
    let stirrup_spacing_mm = round_down(row.stirrup_spacing_mm, &STIRRUP_SPACINGS_MM);
    debug!(
        row_tension_dia_mm = row.tension_dia_mm,
        tension_dia_mm,
        row_stirrup_dia_mm = row.stirrup_dia_mm,
        stirrup_dia_mm,
        row_stirrup_spacing_mm = row.stirrup_spacing_mm,
        stirrup_spacing_mm,
        "rounded row sizes to stocked sizes"
    );

    let depth_m = effective_depth_m(query.span_m, query.beam_type);
    let pct_ast = pct_ast(row.tension_bars, tension_dia_mm);
    let pct_area = pct_area(query.span_m, depth_m, pct_ast, settings.pct_area_policy);

    Ok(DesignResult {
        beam_type: query.beam_type,
        depth_m,
        tension_bars: row.tension_bars,
        tension_dia_mm,
        compression_bars: row.compression_bars,
        compression_dia_mm,
        stirrup_dia_mm,
        stirrup_spacing_mm,
        pct_area,
        pct_ast,
        pct_area_policy: settings.pct_area_policy,
        fck: query.fck,
        fy: query.fy,
        matched: MatchInfo::from(&found),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DesignRow;

    fn defaults() -> DesignSettings {
        DesignSettings::default()
    }

    #[test]
    fn test_simply_supported_example() {
        let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.30);
        let result = calculate(&query, Dataset::builtin(), &defaults()).unwrap();

        assert_eq!(result.tension_dia_mm, 16);
        assert_eq!(result.tension_bars, 4);
        assert_eq!(result.compression_dia_mm, 16);
        assert_eq!(result.compression_bars, 3);
        assert_eq!(result.stirrup_dia_mm, 8);
        assert_eq!(result.stirrup_spacing_mm, 150);
        assert!((result.depth_m - 0.6).abs() < 1e-12);
        assert!((result.pct_ast - 72.69).abs() < 1e-9);
        assert!((result.pct_area - 40.0).abs() < 1e-9);
        assert_eq!(result.matched.row_index, 0);
    }

    #[test]
    fn test_cantilever_example() {
        let query = DesignQuery::new(BeamType::Cantilever, 6.0, 0.30);
        let result = calculate(&query, Dataset::builtin(), &defaults()).unwrap();

        assert_eq!(result.tension_dia_mm, 25);
        assert_eq!(result.stirrup_dia_mm, 10);
        assert_eq!(result.stirrup_spacing_mm, 100);
        assert!((result.depth_m - 0.86).abs() < 1e-12);
        assert!((result.pct_ast - 33.33).abs() < 1e-9);
        // D_max = 1.0, D = 0.86 -> 14%
        assert!((result.pct_area - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_nearest_row() {
        let query = DesignQuery::new(BeamType::Continuous, 4.6, 0.25);
        let result = calculate(&query, Dataset::builtin(), &defaults()).unwrap();

        assert_eq!(result.matched.row_index, 3);
        assert_eq!(result.tension_dia_mm, 16);
        // 4.6 / 12 = 0.383 -> 0.38
        assert!((result.depth_m - 0.38).abs() < 1e-12);
    }

    #[test]
    fn test_depth_rounds_stored_value() {
        let query = DesignQuery::new(BeamType::Continuous, 5.1, 0.30);
        let result = calculate(&query, Dataset::builtin(), &defaults()).unwrap();

        // 5.1 / 12 = 0.42499999... -> 0.42, not 0.43
        assert_eq!(result.depth_m, 0.42);
        assert!((result.pct_area - 50.59).abs() < 1e-9);
    }

    #[test]
    fn test_averaged_policy() {
        let settings = defaults().with_pct_area_policy(PctAreaPolicy::AveragedWithAst);
        let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.30);
        let result = calculate(&query, Dataset::builtin(), &settings).unwrap();

        assert_eq!(result.pct_area_policy, PctAreaPolicy::AveragedWithAst);
        assert!((result.pct_ast - 72.69).abs() < 1e-9);
        assert!((result.pct_area - 36.55).abs() < 1e-9);
    }

    #[test]
    fn test_nonstandard_row_sizes_rounded() {
        let rows = vec![
            DesignRow::new(BeamType::SimplySupported, 6.0, 0.3, 18, 3, 9, 175).with_compression(14, 2),
        ];
        let dataset = Dataset::new(rows).unwrap();
        let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.30);
        let result = calculate(&query, &dataset, &defaults()).unwrap();

        assert_eq!(result.tension_dia_mm, 20);
        assert_eq!(result.compression_dia_mm, 16);
        assert_eq!(result.stirrup_dia_mm, 10);
        assert_eq!(result.stirrup_spacing_mm, 150);
    }

    #[test]
    fn test_missing_beam_type_gives_no_result() {
        let rows = vec![DesignRow::new(BeamType::SimplySupported, 6.0, 0.3, 16, 4, 8, 150)];
        let dataset = Dataset::new(rows).unwrap();
        let query = DesignQuery::new(BeamType::Cantilever, 6.0, 0.30);

        let err = calculate(&query, &dataset, &defaults()).unwrap_err();
        assert_eq!(err, CalcError::no_matching_row(BeamType::Cantilever));
    }

    #[test]
    fn test_out_of_bounds_inputs() {
        let table = Dataset::builtin();
        let settings = defaults();

        let query = DesignQuery::new(BeamType::SimplySupported, 12.0, 0.30);
        assert_eq!(calculate(&query, table, &settings).unwrap_err().error_code(), "INVALID_INPUT");

        let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.10);
        assert!(calculate(&query, table, &settings).is_err());

        let query = DesignQuery::new(BeamType::SimplySupported, f64::NAN, 0.30);
        assert!(calculate(&query, table, &settings).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let query = DesignQuery::new(BeamType::Continuous, 10.0, 0.60);
        assert!(calculate(&query, Dataset::builtin(), &defaults()).is_ok());

        let query = DesignQuery::new(BeamType::Continuous, 1.0, 0.20);
        assert!(calculate(&query, Dataset::builtin(), &defaults()).is_ok());
    }

    #[test]
    fn test_grades_do_not_change_estimate() {
        let base = DesignQuery::new(BeamType::Continuous, 5.5, 0.35);
        let a = calculate(&base, Dataset::builtin(), &defaults()).unwrap();
        let b = calculate(&base.clone().with_grades(40, 500), Dataset::builtin(), &defaults()).unwrap();

        assert_eq!(a.tension_dia_mm, b.tension_dia_mm);
        assert_eq!(a.pct_area, b.pct_area);
        assert_eq!(a.pct_ast, b.pct_ast);
        assert_eq!(b.fck, 40);
        assert_eq!(b.fy, 500);
    }

    #[test]
    fn test_unsupported_grades_rejected() {
        let query = DesignQuery::new(BeamType::Continuous, 5.0, 0.30).with_grades(35, 415);
        assert!(calculate(&query, Dataset::builtin(), &defaults()).is_err());

        let query = DesignQuery::new(BeamType::Continuous, 5.0, 0.30).with_grades(25, 600);
        assert!(calculate(&query, Dataset::builtin(), &defaults()).is_err());
    }

    #[test]
    fn test_query_json_defaults_grades() {
        let query: DesignQuery =
            serde_json::from_str(r#"{ "beam_type": "Cantilever", "span_m": 5.0, "width_m": 0.3 }"#).unwrap();
        assert_eq!(query.fck, DEFAULT_FCK);
        assert_eq!(query.fy, DEFAULT_FY);
    }

    #[test]
    fn test_result_serialization() {
        let query = DesignQuery::new(BeamType::SimplySupported, 6.0, 0.30);
        let result = calculate(&query, Dataset::builtin(), &defaults()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();

        assert!(json.contains("pct_ast"));
        assert!(json.contains("stirrup_spacing_mm"));
        assert!(json.contains("depth_only"));

        let roundtrip: DesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.tension_dia_mm, result.tension_dia_mm);
        assert_eq!(roundtrip.matched.row_index, result.matched.row_index);
        assert!((roundtrip.pct_ast - result.pct_ast).abs() < 1e-9);
    }
}
