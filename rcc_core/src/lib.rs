//! # rcc_core - RCC Beam Reinforcement Estimator
//!
//! `rcc_core` estimates reinforcement for reinforced-concrete beams from a
//! small table of precomputed designs. Given a support condition, span and
//! width it selects the nearest table row, snaps its bar sizes to stocked
//! sizes and derives the effective depth plus two utilisation percentages.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use rcc_core::{calculate, BeamType, Dataset, DesignQuery, DesignSettings};
//!
//! let query = DesignQuery::new(BeamType::Continuous, 5.0, 0.30);
//! let result = calculate(&query, Dataset::builtin(), &DesignSettings::default()).unwrap();
//!
//! println!("{} bars of {} mm", result.tension_bars, result.tension_dia_mm);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Query/result types and the estimate pipeline
//! - [`dataset`] - Design rows and the built-in table
//! - [`selector`] - Nearest-row lookup
//! - [`sizes`] - Stocked bar sizes and rounding
//! - [`equations`] - Depth rule and percentage metrics
//! - [`settings`] - Input bounds and formula policy
//! - [`beam_type`] - Support conditions
//! - [`errors`] - Structured error types
//! - [`file_io`] - Dataset and settings files

pub mod beam_type;
pub mod calculations;
pub mod dataset;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod selector;
pub mod settings;
pub mod sizes;

// Re-export commonly used types at crate root for convenience
pub use beam_type::BeamType;
pub use calculations::{calculate, DesignQuery, DesignResult};
pub use dataset::{Dataset, DesignRow};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_dataset, load_settings, save_dataset};
pub use settings::DesignSettings;
