//! # Design Table
//!
//! The design table holds precomputed reinforcement layouts for a handful of
//! spans, widths and support conditions. Lookups never modify it.
//!
//! ## Structure
//!
//! ```text
//! DatasetFile
//! ├── meta: DatasetMetadata (version, description, timestamps)
//! └── rows: Vec<DesignRow>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rcc_core::beam_type::BeamType;
//! use rcc_core::dataset::Dataset;
//!
//! let table = Dataset::builtin();
//! assert_eq!(table.len(), 6);
//! assert_eq!(table.rows_for(BeamType::Cantilever).count(), 2);
//! ```

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::beam_type::BeamType;
use crate::errors::{CalcError, CalcResult};
use crate::sizes::{is_standard, MAIN_BAR_DIAS_MM, STIRRUP_DIAS_MM, STIRRUP_SPACINGS_MM};

/// Current schema version for dataset files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Minimum compression bar count when a row does not specify one
const MIN_COMPRESSION_BARS: u32 = 2;

/// One precomputed design in the table.
///
/// ## JSON Example
///
/// ```json
/// {
///   "beam_type": 1,
///   "span_m": 6.0,
///   "width_m": 0.30,
///   "tension_dia_mm": 16,
///   "tension_bars": 4,
///   "compression_dia_mm": 16,
///   "compression_bars": 3,
///   "stirrup_dia_mm": 8,
///   "stirrup_spacing_mm": 150
/// }
/// ```
///
/// The compression fields may be omitted, in which case the row carries
/// `max(2, tension_bars - 1)` bars of the tension diameter. Column names of
/// the legacy table (`BeamType`, `Span`, `Width`, `MainDia`, `NoBars`,
/// `StirrupDia`, `StirrupSpacing`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDesignRow")]
pub struct DesignRow {
    /// Support condition (serialized as its numeric code)
    #[serde(serialize_with = "crate::beam_type::code::serialize")]
    pub beam_type: BeamType,

    /// Span in metres
    pub span_m: f64,

    /// Beam width in metres
    pub width_m: f64,

    /// Tension bar diameter in mm
    pub tension_dia_mm: u32,

    /// Number of tension bars
    pub tension_bars: u32,

    /// Compression bar diameter in mm
    pub compression_dia_mm: u32,

    /// Number of compression bars
    pub compression_bars: u32,

    /// Stirrup bar diameter in mm
    pub stirrup_dia_mm: u32,

    /// Stirrup centre-to-centre spacing in mm
    pub stirrup_spacing_mm: u32,
}

/// Wire shape of a row, before compression defaults are filled in.
#[derive(Deserialize)]
struct RawDesignRow {
    #[serde(alias = "BeamType", with = "crate::beam_type::code")]
    beam_type: BeamType,
    #[serde(alias = "Span")]
    span_m: f64,
    #[serde(alias = "Width")]
    width_m: f64,
    #[serde(alias = "MainDia")]
    tension_dia_mm: u32,
    #[serde(alias = "NoBars")]
    tension_bars: u32,
    #[serde(default)]
    compression_dia_mm: Option<u32>,
    #[serde(default)]
    compression_bars: Option<u32>,
    #[serde(alias = "StirrupDia")]
    stirrup_dia_mm: u32,
    #[serde(alias = "StirrupSpacing")]
    stirrup_spacing_mm: u32,
}

impl From<RawDesignRow> for DesignRow {
    fn from(raw: RawDesignRow) -> Self {
        DesignRow {
            beam_type: raw.beam_type,
            span_m: raw.span_m,
            width_m: raw.width_m,
            tension_dia_mm: raw.tension_dia_mm,
            tension_bars: raw.tension_bars,
            compression_dia_mm: raw.compression_dia_mm.unwrap_or(raw.tension_dia_mm),
            compression_bars: raw
                .compression_bars
                .unwrap_or_else(|| default_compression_bars(raw.tension_bars)),
            stirrup_dia_mm: raw.stirrup_dia_mm,
            stirrup_spacing_mm: raw.stirrup_spacing_mm,
        }
    }
}

fn default_compression_bars(tension_bars: u32) -> u32 {
    tension_bars.saturating_sub(1).max(MIN_COMPRESSION_BARS)
}

impl DesignRow {
    /// Create a row whose compression steel is derived from the tension steel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rcc_core::beam_type::BeamType;
    /// use rcc_core::dataset::DesignRow;
    ///
    /// let row = DesignRow::new(BeamType::SimplySupported, 6.0, 0.30, 16, 4, 8, 150);
    /// assert_eq!(row.compression_bars, 3);
    /// assert_eq!(row.compression_dia_mm, 16);
    /// ```
    pub fn new(
        beam_type: BeamType,
        span_m: f64,
        width_m: f64,
        tension_dia_mm: u32,
        tension_bars: u32,
        stirrup_dia_mm: u32,
        stirrup_spacing_mm: u32,
    ) -> Self {
        DesignRow {
            beam_type,
            span_m,
            width_m,
            tension_dia_mm,
            tension_bars,
            compression_dia_mm: tension_dia_mm,
            compression_bars: default_compression_bars(tension_bars),
            stirrup_dia_mm,
            stirrup_spacing_mm,
        }
    }

    /// Override the compression reinforcement.
    pub fn with_compression(mut self, dia_mm: u32, bars: u32) -> Self {
        self.compression_dia_mm = dia_mm;
        self.compression_bars = bars;
        self
    }

    /// Validate dimensions and counts.
    ///
    /// Sizes outside the standard sets are not an error (they are rounded at
    /// lookup time) but are logged.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.span_m.is_finite() || self.span_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "span_m",
                self.span_m.to_string(),
                "Row span must be a positive number",
            ));
        }
        if !self.width_m.is_finite() || self.width_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "width_m",
                self.width_m.to_string(),
                "Row width must be a positive number",
            ));
        }

        let counts = [
            ("tension_dia_mm", self.tension_dia_mm),
            ("tension_bars", self.tension_bars),
            ("compression_dia_mm", self.compression_dia_mm),
            ("compression_bars", self.compression_bars),
            ("stirrup_dia_mm", self.stirrup_dia_mm),
            ("stirrup_spacing_mm", self.stirrup_spacing_mm),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(CalcError::invalid_input(field, "0", "Value must be greater than zero"));
            }
        }

        let sizes = [
            ("tension_dia_mm", self.tension_dia_mm, &MAIN_BAR_DIAS_MM[..]),
            ("compression_dia_mm", self.compression_dia_mm, &MAIN_BAR_DIAS_MM[..]),
            ("stirrup_dia_mm", self.stirrup_dia_mm, &STIRRUP_DIAS_MM[..]),
            ("stirrup_spacing_mm", self.stirrup_spacing_mm, &STIRRUP_SPACINGS_MM[..]),
        ];
        for (field, value, allowed) in sizes {
            if !is_standard(value, allowed) {
                warn!(field, value, ?allowed, "non-standard size in design row, will be rounded");
            }
        }

        Ok(())
    }
}

/// Read-only collection of design rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<DesignRow>,
}

static BUILTIN: Lazy<Dataset> = Lazy::new(|| Dataset {
    rows: vec![
        DesignRow::new(BeamType::SimplySupported, 6.0, 0.30, 16, 4, 8, 150),
        DesignRow::new(BeamType::SimplySupported, 5.0, 0.30, 12, 4, 8, 200),
        DesignRow::new(BeamType::Continuous, 6.0, 0.30, 20, 4, 8, 200),
        DesignRow::new(BeamType::Continuous, 5.0, 0.30, 16, 4, 8, 150),
        DesignRow::new(BeamType::Cantilever, 6.0, 0.30, 25, 4, 10, 100),
        DesignRow::new(BeamType::Cantilever, 5.0, 0.30, 20, 4, 10, 100),
    ],
});

impl Dataset {
    /// Build a dataset, validating every row.
    ///
    /// # Errors
    ///
    /// * `CalcError::EmptyDataset` - no rows given
    /// * `CalcError::InvalidInput` - a row failed [`DesignRow::validate`]
    pub fn new(rows: Vec<DesignRow>) -> CalcResult<Self> {
        if rows.is_empty() {
            return Err(CalcError::EmptyDataset);
        }
        for row in &rows {
            row.validate()?;
        }
        Ok(Dataset { rows })
    }

    /// The built-in six-row design table, initialised on first use.
    pub fn builtin() -> &'static Dataset {
        &BUILTIN
    }

    /// All rows in table order
    pub fn rows(&self) -> &[DesignRow] {
        &self.rows
    }

    /// Rows for one beam type, in table order
    pub fn rows_for(&self, beam_type: BeamType) -> impl Iterator<Item = &DesignRow> + '_ {
        self.rows.iter().filter(move |row| row.beam_type == beam_type)
    }

    /// Beam types present in the table, in [`BeamType::ALL`] order
    pub fn beam_types(&self) -> Vec<BeamType> {
        BeamType::ALL
            .into_iter()
            .filter(|beam| self.rows.iter().any(|row| row.beam_type == *beam))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Metadata stored alongside the rows in a dataset file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Schema version (for migration support)
    pub version: String,
    /// Free-text description of where the rows come from
    #[serde(default)]
    pub description: String,
    /// When the file was first written
    pub created: DateTime<Utc>,
    /// When the file was last written
    pub modified: DateTime<Utc>,
}

/// Root container of a dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub meta: DatasetMetadata,
    pub rows: Vec<DesignRow>,
}

impl DatasetFile {
    /// Wrap a dataset for saving, stamping fresh metadata.
    pub fn new(dataset: &Dataset, description: impl Into<String>) -> Self {
        let now = Utc::now();
        DatasetFile {
            meta: DatasetMetadata {
                version: SCHEMA_VERSION.to_string(),
                description: description.into(),
                created: now,
                modified: now,
            },
            rows: dataset.rows().to_vec(),
        }
    }

    /// Validate the rows and turn them into a [`Dataset`].
    pub fn into_dataset(self) -> CalcResult<Dataset> {
        Dataset::new(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_partitions() {
        let table = Dataset::builtin();
        assert_eq!(table.len(), 6);
        for beam in BeamType::ALL {
            assert_eq!(table.rows_for(beam).count(), 2);
        }
        assert_eq!(table.beam_types(), BeamType::ALL.to_vec());
    }

    #[test]
    fn test_builtin_rows_valid() {
        for row in Dataset::builtin().rows() {
            assert!(row.validate().is_ok());
        }
    }

    #[test]
    fn test_default_compression() {
        let row = DesignRow::new(BeamType::Cantilever, 5.0, 0.3, 20, 4, 10, 100);
        assert_eq!(row.compression_bars, 3);
        assert_eq!(row.compression_dia_mm, 20);

        let sparse = DesignRow::new(BeamType::Cantilever, 5.0, 0.3, 20, 2, 10, 100);
        assert_eq!(sparse.compression_bars, 2);
    }

    #[test]
    fn test_with_compression_override() {
        let row = DesignRow::new(BeamType::Continuous, 5.0, 0.3, 16, 4, 8, 150).with_compression(12, 2);
        assert_eq!(row.compression_dia_mm, 12);
        assert_eq!(row.compression_bars, 2);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_eq!(Dataset::new(Vec::new()), Err(CalcError::EmptyDataset));
    }

    #[test]
    fn test_invalid_row_rejected() {
        let mut row = DesignRow::new(BeamType::SimplySupported, 6.0, 0.3, 16, 4, 8, 150);
        row.width_m = 0.0;
        assert!(Dataset::new(vec![row.clone()]).is_err());

        row.width_m = 0.3;
        row.tension_bars = 0;
        assert!(Dataset::new(vec![row]).is_err());
    }

    #[test]
    fn test_nonstandard_size_accepted() {
        let row = DesignRow::new(BeamType::SimplySupported, 6.0, 0.3, 18, 4, 8, 175);
        assert!(Dataset::new(vec![row]).is_ok());
    }

    #[test]
    fn test_row_json_uses_numeric_code() {
        let row = DesignRow::new(BeamType::Cantilever, 6.0, 0.3, 25, 4, 10, 100);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["beam_type"], 2);

        let roundtrip: DesignRow = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, row);
    }

    #[test]
    fn test_legacy_column_names() {
        let json = r#"{
            "BeamType": 3, "Span": 6.0, "Width": 0.3,
            "MainDia": 20, "NoBars": 4,
            "StirrupDia": 8, "StirrupSpacing": 200
        }"#;
        let row: DesignRow = serde_json::from_str(json).unwrap();
        assert_eq!(row, DesignRow::new(BeamType::Continuous, 6.0, 0.3, 20, 4, 8, 200));
    }

    #[test]
    fn test_unknown_beam_code_rejected() {
        let json = r#"{
            "beam_type": 7, "span_m": 6.0, "width_m": 0.3,
            "tension_dia_mm": 20, "tension_bars": 4,
            "stirrup_dia_mm": 8, "stirrup_spacing_mm": 200
        }"#;
        assert!(serde_json::from_str::<DesignRow>(json).is_err());
    }
}
