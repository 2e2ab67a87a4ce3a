//! Beam support conditions
//!
//! The support condition partitions the design table and selects the
//! span/depth divisor. Dataset files identify beam types by a numeric code:
//!
//! | Code | Beam type        |
//! |------|------------------|
//! | 1    | Simply supported |
//! | 2    | Cantilever       |
//! | 3    | Continuous       |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Structural support condition of a beam.
///
/// # Example
/// ```
/// use rcc_core::beam_type::BeamType;
///
/// let beam: BeamType = "cantilever".parse().unwrap();
/// assert_eq!(beam.code(), 2);
/// assert_eq!(beam.display_name(), "Cantilever");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BeamType {
    /// Pinned at both ends
    #[default]
    SimplySupported,
    /// Fixed at one end, free at the other
    Cantilever,
    /// Runs over more than two supports
    Continuous,
}

impl BeamType {
    /// All beam types in UI order
    pub const ALL: [BeamType; 3] = [
        BeamType::SimplySupported,
        BeamType::Cantilever,
        BeamType::Continuous,
    ];

    /// Numeric code used in dataset files
    pub fn code(&self) -> u8 {
        match self {
            BeamType::SimplySupported => 1,
            BeamType::Cantilever => 2,
            BeamType::Continuous => 3,
        }
    }

    /// Look up a beam type from its dataset code
    pub fn from_code(code: u8) -> CalcResult<Self> {
        match code {
            1 => Ok(BeamType::SimplySupported),
            2 => Ok(BeamType::Cantilever),
            3 => Ok(BeamType::Continuous),
            other => Err(CalcError::invalid_input(
                "beam_type",
                other.to_string(),
                "Beam type code must be 1 (simply supported), 2 (cantilever) or 3 (continuous)",
            )),
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            BeamType::SimplySupported => "Simply Supported",
            BeamType::Cantilever => "Cantilever",
            BeamType::Continuous => "Continuous",
        }
    }
}

impl fmt::Display for BeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BeamType {
    type Err = CalcError;

    /// Accepts names ("simply-supported", "Simply Supported", "ss"), short
    /// forms ("cantilever", "cant", "continuous", "cont") and codes ("1".."3").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "1" | "ss" | "simple" | "simplysupported" => Ok(BeamType::SimplySupported),
            "2" | "cant" | "cantilever" => Ok(BeamType::Cantilever),
            "3" | "cont" | "continuous" => Ok(BeamType::Continuous),
            _ => Err(CalcError::invalid_input(
                "beam_type",
                s,
                "Expected simply-supported, cantilever or continuous",
            )),
        }
    }
}

/// Serde adapter storing a [`BeamType`] as its numeric dataset code.
///
/// Use with `#[serde(with = "crate::beam_type::code")]`.
pub mod code {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BeamType;

    pub fn serialize<S: Serializer>(beam_type: &BeamType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(beam_type.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BeamType, D::Error> {
        let code = u8::deserialize(deserializer)?;
        BeamType::from_code(code).map_err(D::Error::custom)
    }
}
