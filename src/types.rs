use serde::{Deserialize, Serialize};

/// One row of the demand table: `quantity` pieces of `length` for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    pub profile_code: String,
    pub length: f64,
    /// Expected to be a positive integer; fractional values are floored on
    /// expansion.
    pub quantity: f64,
}

impl DemandLine {
    pub fn new(profile_code: impl Into<String>, length: f64, quantity: f64) -> Self {
        Self {
            profile_code: profile_code.into(),
            length,
            quantity,
        }
    }
}

/// A single required piece. `item_id` is unique within its profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandItem {
    pub profile_code: String,
    pub length: f64,
    pub item_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMethod {
    /// Highest used-length / stock-length ratio wins.
    #[default]
    MaxEfficiency,
    /// Fewest bars wins, efficiency breaks ties.
    MinBarCount,
}

/// A stock bar as built by the pattern generator, before it is numbered.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub pieces: Vec<f64>,
    /// Stock length minus every placed piece and one cutting gap per piece.
    pub remaining: f64,
}

impl Bar {
    pub fn piece_total(&self) -> f64 {
        self.pieces.iter().sum()
    }
}

/// The outcome of packing one profile into one candidate stock length.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub stock_length: f64,
    pub bars: Vec<Bar>,
    pub bar_count: usize,
    pub efficiency: f64,
}

/// A numbered bar of the winning solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub profile_code: String,
    pub bar_number: usize,
    pub stock_length: f64,
    pub pieces: Vec<f64>,
    pub used_length: f64,
    pub remaining_length: f64,
    pub efficiency: f64,
}

impl Pattern {
    pub fn from_bar(profile_code: &str, bar_number: usize, stock_length: f64, bar: Bar) -> Self {
        let efficiency = bar.piece_total() / stock_length;
        Self {
            profile_code: profile_code.to_string(),
            bar_number,
            stock_length,
            used_length: stock_length - bar.remaining,
            remaining_length: bar.remaining,
            efficiency,
            pieces: bar.pieces,
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Piece lengths joined with `+`, e.g. `1500+1500+1200`.
    pub fn cutting_pattern(&self) -> String {
        self.pieces
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub profile_code: String,
    pub total_pieces: usize,
    pub total_bars_used: usize,
    pub total_length_needed: f64,
    pub total_stock_length: f64,
    pub waste: f64,
    pub overall_efficiency: f64,
    pub average_bar_efficiency: f64,
}

/// Binds a demand item to the bar it is cut from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub profile_code: String,
    pub item_id: String,
    pub length: f64,
    pub bar_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_from_bar() {
        let bar = Bar {
            pieces: vec![1500.0, 1500.0, 1200.0, 1200.0],
            remaining: 560.0,
        };
        let p = Pattern::from_bar("A", 1, 6000.0, bar);
        assert_eq!(p.used_length, 5440.0);
        assert_eq!(p.remaining_length, 560.0);
        assert!((p.efficiency - 0.9).abs() < 1e-12);
        assert_eq!(p.piece_count(), 4);
        assert_eq!(p.cutting_pattern(), "1500+1500+1200+1200");
    }

    #[test]
    fn test_cutting_pattern_keeps_fractions() {
        let bar = Bar {
            pieces: vec![1200.5, 800.0],
            remaining: 3979.5,
        };
        let p = Pattern::from_bar("B", 2, 6000.0, bar);
        assert_eq!(p.cutting_pattern(), "1200.5+800");
    }

    #[test]
    fn test_method_serde_names() {
        let json = serde_json::to_string(&OptimizationMethod::MinBarCount).unwrap();
        assert_eq!(json, "\"min_bar_count\"");
        let m: OptimizationMethod = serde_json::from_str("\"max_efficiency\"").unwrap();
        assert_eq!(m, OptimizationMethod::MaxEfficiency);
    }
}
