use serde::{Deserialize, Serialize};

use crate::error::{CutError, Result};
use crate::types::OptimizationMethod;

pub const DEFAULT_STOCK_LENGTH: f64 = 6000.0;
pub const DEFAULT_CUTTING_GAP: f64 = 10.0;
pub const MIN_STOCK_LENGTH: f64 = 1000.0;
pub const MIN_CUTTING_GAP: f64 = 1.0;

/// Which stock lengths are tried when stock-length optimization is on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StockLengthOptions {
    /// Only the configured `stock_length`.
    #[default]
    Fixed,
    /// An explicit list, evaluated in the given order.
    Choices { lengths: Vec<f64> },
    /// `min, min + step, ...` while below `max + step`.
    Range { min: u32, max: u32, step: u32 },
}

impl StockLengthOptions {
    fn expand(&self, stock_length: f64) -> Result<Vec<f64>> {
        match self {
            StockLengthOptions::Fixed => Ok(vec![stock_length]),
            StockLengthOptions::Choices { lengths } => {
                if let Some(bad) = lengths.iter().find(|l| !l.is_finite() || **l <= 0.0) {
                    return Err(CutError::Validation(format!(
                        "stock length option {bad} must be a positive number"
                    )));
                }
                Ok(lengths.clone())
            }
            &StockLengthOptions::Range { min, max, step } => {
                if step == 0 {
                    return Err(CutError::Validation(
                        "stock length range step must be non-zero".to_string(),
                    ));
                }
                if min > max {
                    return Err(CutError::Validation(format!(
                        "stock length range minimum {min} exceeds maximum {max}"
                    )));
                }
                // The upper bound is exclusive of max + step, so an unaligned
                // range ends one step past max.
                Ok((min..max.saturating_add(step))
                    .step_by(step as usize)
                    .map(f64::from)
                    .collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeParams {
    pub stock_length: f64,
    pub cutting_gap: f64,
    pub method: OptimizationMethod,
    pub stock_options: StockLengthOptions,
    /// When false only `stock_length` is evaluated, whatever `stock_options` say.
    pub optimize_stock_length: bool,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        Self {
            stock_length: DEFAULT_STOCK_LENGTH,
            cutting_gap: DEFAULT_CUTTING_GAP,
            method: OptimizationMethod::MaxEfficiency,
            stock_options: StockLengthOptions::Fixed,
            optimize_stock_length: false,
        }
    }
}

impl OptimizeParams {
    pub fn with_method(mut self, method: OptimizationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_stock_options(mut self, options: StockLengthOptions) -> Self {
        self.stock_options = options;
        self.optimize_stock_length = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.stock_length.is_finite() || self.stock_length < MIN_STOCK_LENGTH {
            return Err(CutError::Validation(format!(
                "stock length must be at least {MIN_STOCK_LENGTH}, got {}",
                self.stock_length
            )));
        }
        if !self.cutting_gap.is_finite() || self.cutting_gap < MIN_CUTTING_GAP {
            return Err(CutError::Validation(format!(
                "cutting gap must be at least {MIN_CUTTING_GAP}, got {}",
                self.cutting_gap
            )));
        }
        Ok(())
    }

    /// Stock lengths to evaluate, in tie-break order.
    pub fn candidate_stock_lengths(&self) -> Result<Vec<f64>> {
        let candidates = if self.optimize_stock_length {
            self.stock_options.expand(self.stock_length)?
        } else {
            vec![self.stock_length]
        };
        if candidates.is_empty() {
            return Err(CutError::NoCandidate);
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = OptimizeParams::default();
        assert_eq!(params.stock_length, 6000.0);
        assert_eq!(params.cutting_gap, 10.0);
        assert_eq!(params.method, OptimizationMethod::MaxEfficiency);
        assert!(params.validate().is_ok());
        assert_eq!(params.candidate_stock_lengths().unwrap(), vec![6000.0]);
    }

    #[test]
    fn test_options_ignored_unless_optimizing() {
        let params = OptimizeParams {
            stock_options: StockLengthOptions::Choices {
                lengths: vec![5000.0, 7000.0],
            },
            ..OptimizeParams::default()
        };
        assert_eq!(params.candidate_stock_lengths().unwrap(), vec![6000.0]);
    }

    #[test]
    fn test_choices_keep_order() {
        let params = OptimizeParams::default().with_stock_options(StockLengthOptions::Choices {
            lengths: vec![7000.0, 5000.0, 6000.0],
        });
        assert_eq!(
            params.candidate_stock_lengths().unwrap(),
            vec![7000.0, 5000.0, 6000.0]
        );
    }

    #[test]
    fn test_empty_choices_is_no_candidate() {
        let params = OptimizeParams::default()
            .with_stock_options(StockLengthOptions::Choices { lengths: vec![] });
        assert_eq!(params.candidate_stock_lengths(), Err(CutError::NoCandidate));
    }

    #[test]
    fn test_range_inclusive_when_aligned() {
        let params = OptimizeParams::default().with_stock_options(StockLengthOptions::Range {
            min: 5500,
            max: 6500,
            step: 500,
        });
        assert_eq!(
            params.candidate_stock_lengths().unwrap(),
            vec![5500.0, 6000.0, 6500.0]
        );
    }

    #[test]
    fn test_range_overshoots_when_unaligned() {
        let params = OptimizeParams::default().with_stock_options(StockLengthOptions::Range {
            min: 5500,
            max: 5750,
            step: 100,
        });
        assert_eq!(
            params.candidate_stock_lengths().unwrap(),
            vec![5500.0, 5600.0, 5700.0, 5800.0]
        );
    }

    #[test]
    fn test_range_rejects_zero_step() {
        let params = OptimizeParams::default().with_stock_options(StockLengthOptions::Range {
            min: 5500,
            max: 6500,
            step: 0,
        });
        assert!(matches!(
            params.candidate_stock_lengths(),
            Err(CutError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_minimums() {
        let short = OptimizeParams {
            stock_length: 999.0,
            ..OptimizeParams::default()
        };
        assert!(matches!(short.validate(), Err(CutError::Validation(_))));

        let no_gap = OptimizeParams {
            cutting_gap: 0.0,
            ..OptimizeParams::default()
        };
        assert!(matches!(no_gap.validate(), Err(CutError::Validation(_))));
    }

    #[test]
    fn test_deserialize_partial_body() {
        let params: OptimizeParams = serde_json::from_str(
            r#"{"method": "min_bar_count", "optimize_stock_length": true,
                "stock_options": {"mode": "choices", "lengths": [5000, 6500]}}"#,
        )
        .unwrap();
        assert_eq!(params.stock_length, 6000.0);
        assert_eq!(params.method, OptimizationMethod::MinBarCount);
        assert_eq!(
            params.candidate_stock_lengths().unwrap(),
            vec![5000.0, 6500.0]
        );
    }
}
