use serde::Serialize;

use crate::metrics::round4;
use crate::solver::ProfileSolution;
use crate::types::{Assignment, Pattern, Summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRow {
    pub profile_code: String,
    pub bar_number: usize,
    pub stock_length: f64,
    pub used_length: f64,
    pub remaining_length: f64,
    pub efficiency: f64,
    pub cutting_pattern: String,
    pub piece_count: usize,
}

impl From<&Pattern> for PatternRow {
    fn from(p: &Pattern) -> Self {
        Self {
            profile_code: p.profile_code.clone(),
            bar_number: p.bar_number,
            stock_length: p.stock_length,
            used_length: p.used_length,
            remaining_length: p.remaining_length,
            efficiency: round4(p.efficiency),
            cutting_pattern: p.cutting_pattern(),
            piece_count: p.piece_count(),
        }
    }
}

/// The run parameters, exported alongside the results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRow {
    pub stock_length: f64,
    pub cutting_gap: f64,
}

/// The stock length chosen for a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockChoice {
    pub profile_code: String,
    pub stock_length: f64,
    pub bar_count: usize,
    pub efficiency: f64,
}

/// A profile that produced no rows, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileFailure {
    pub profile_code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuttingPlan {
    pub parameters: ParameterRow,
    pub stock_choices: Vec<StockChoice>,
    pub patterns: Vec<PatternRow>,
    pub summary: Vec<Summary>,
    pub assignments: Vec<Assignment>,
    pub failures: Vec<ProfileFailure>,
    /// Full bars behind `patterns`, same order.
    #[serde(skip)]
    pub bars: Vec<Pattern>,
}

impl CuttingPlan {
    /// Flattens per-profile solutions into output tables sorted by profile
    /// code, then bar number. Sorting is stable, so rows of one bar keep
    /// their cut order.
    pub fn from_solutions(
        parameters: ParameterRow,
        mut solutions: Vec<ProfileSolution>,
        failures: Vec<ProfileFailure>,
    ) -> Self {
        solutions.sort_by(|a, b| a.profile_code.cmp(&b.profile_code));

        let mut plan = CuttingPlan {
            parameters,
            stock_choices: Vec::with_capacity(solutions.len()),
            patterns: Vec::new(),
            summary: Vec::with_capacity(solutions.len()),
            assignments: Vec::new(),
            failures,
            bars: Vec::new(),
        };

        for sol in solutions {
            plan.stock_choices.push(StockChoice {
                profile_code: sol.profile_code.clone(),
                stock_length: sol.stock_length,
                bar_count: sol.patterns.len(),
                efficiency: round4(sol.efficiency),
            });
            plan.patterns.extend(sol.patterns.iter().map(PatternRow::from));
            plan.bars.extend(sol.patterns);
            plan.summary.push(Summary {
                overall_efficiency: round4(sol.summary.overall_efficiency),
                average_bar_efficiency: round4(sol.summary.average_bar_efficiency),
                ..sol.summary
            });
            let mut assignments = sol.assignments;
            assignments.sort_by_key(|a| a.bar_number);
            plan.assignments.extend(assignments);
        }
        plan
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
