//! # Design Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Query` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(query, ..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`design`] - Table-driven reinforcement estimate for an RCC beam

pub mod design;

pub use design::{calculate, DesignQuery, DesignResult};
