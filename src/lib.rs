//! One-dimensional cutting-stock optimizer for aluminium profile bars.
//!
//! Demand lines are expanded into unit items per profile code, packed into
//! stock bars with first-fit-decreasing for every candidate stock length, and
//! the winning candidate is turned into pattern, summary and assignment tables.

pub mod assign;
pub mod config;
pub mod error;
pub mod expand;
pub mod ffd;
pub mod metrics;
pub mod render;
pub mod solver;
pub mod tables;
pub mod types;
pub mod validate;

pub use config::{OptimizeParams, StockLengthOptions};
pub use error::{CutError, Result};
pub use solver::Solver;
pub use tables::CuttingPlan;
pub use types::{DemandLine, OptimizationMethod};
