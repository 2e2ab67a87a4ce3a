//! # Design Settings
//!
//! Tunable policy for a design run: the input bounds the front end enforces
//! and which area-percentage formula is reported. Settings serialize to JSON,
//! and any key left out of a settings file takes its default.
//!
//! ```rust
//! use rcc_core::settings::DesignSettings;
//! use rcc_core::equations::PctAreaPolicy;
//!
//! let settings: DesignSettings =
//!     serde_json::from_str(r#"{ "pct_area_policy": "averaged_with_ast" }"#).unwrap();
//! assert_eq!(settings.pct_area_policy, PctAreaPolicy::AveragedWithAst);
//! assert_eq!(settings.span_limits_m, (1.0, 10.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::PctAreaPolicy;
use crate::errors::{CalcError, CalcResult};

/// Concrete grades (fck, N/mm²) accepted as input
pub const CONCRETE_GRADES: [u32; 4] = [20, 25, 30, 40];

/// Steel grades (fy, N/mm²) accepted as input
pub const STEEL_GRADES: [u32; 3] = [250, 415, 500];

/// Settings applied to every design run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Formula used for the area percentage
    pub pct_area_policy: PctAreaPolicy,

    /// Inclusive (min, max) span in metres
    pub span_limits_m: (f64, f64),

    /// Inclusive (min, max) width in metres
    pub width_limits_m: (f64, f64),
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            pct_area_policy: PctAreaPolicy::DepthOnly,
            span_limits_m: (1.0, 10.0),
            width_limits_m: (0.20, 0.60),
        }
    }
}

impl DesignSettings {
    /// Check the limits themselves are usable.
    pub fn validate(&self) -> CalcResult<()> {
        check_limits("span_limits_m", self.span_limits_m)?;
        check_limits("width_limits_m", self.width_limits_m)
    }

    /// Builder-style policy override
    pub fn with_pct_area_policy(mut self, policy: PctAreaPolicy) -> Self {
        self.pct_area_policy = policy;
        self
    }
}

fn check_limits(field: &str, (min, max): (f64, f64)) -> CalcResult<()> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
        return Err(CalcError::invalid_input(
            field,
            format!("({min}, {max})"),
            "Limits must be positive, finite and ordered (min <= max)",
        ));
    }
    Ok(())
}
