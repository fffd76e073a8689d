use crate::assign::assign_items;
use crate::config::OptimizeParams;
use crate::error::{CutError, Result};
use crate::expand::{ProfileDemand, expand_demand, group_by_profile};
use crate::ffd::{Oversize, generate_patterns, sort_descending};
use crate::metrics::summarize;
use crate::tables::{CuttingPlan, ParameterRow, ProfileFailure};
use crate::types::{Assignment, CandidateResult, DemandLine, OptimizationMethod, Pattern, Summary};
use crate::validate::{validate_demand, validate_expansion};

pub struct Solver {
    params: OptimizeParams,
    demand: Vec<DemandLine>,
}

/// The winning solution of one profile code.
#[derive(Debug, Clone)]
pub struct ProfileSolution {
    pub profile_code: String,
    pub stock_length: f64,
    pub efficiency: f64,
    pub patterns: Vec<Pattern>,
    pub summary: Summary,
    pub assignments: Vec<Assignment>,
}

impl Solver {
    pub fn new(params: OptimizeParams, demand: Vec<DemandLine>) -> Self {
        Self { params, demand }
    }

    /// Optimizes every profile independently.
    ///
    /// Invalid input or an empty candidate set fails the whole run before any
    /// profile is touched. A profile whose pieces fit no candidate is reported
    /// in `failures` and contributes no rows.
    pub fn solve(&self) -> Result<CuttingPlan> {
        validate_demand(&self.demand)?;
        self.params.validate()?;
        let candidates = self.params.candidate_stock_lengths()?;

        let items = expand_demand(&self.demand);
        validate_expansion(&self.demand, &items)?;
        let groups = group_by_profile(items);
        let mut solutions = Vec::with_capacity(groups.len());
        let mut failures = Vec::new();

        for group in &groups {
            match optimize_profile(
                group,
                &candidates,
                self.params.cutting_gap,
                self.params.method,
            ) {
                Ok(sol) => {
                    tracing::info!(
                        profile = %sol.profile_code,
                        stock_length = sol.stock_length,
                        bars = sol.patterns.len(),
                        "profile optimized"
                    );
                    solutions.push(sol);
                }
                Err(e) => {
                    tracing::warn!(profile = %group.profile_code, error = %e, "profile skipped");
                    failures.push(ProfileFailure {
                        profile_code: group.profile_code.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let parameters = ParameterRow {
            stock_length: self.params.stock_length,
            cutting_gap: self.params.cutting_gap,
        };
        Ok(CuttingPlan::from_solutions(parameters, solutions, failures))
    }
}

/// Packs one profile into every candidate stock length and keeps the winner.
pub fn optimize_profile(
    demand: &ProfileDemand,
    candidates: &[f64],
    cutting_gap: f64,
    method: OptimizationMethod,
) -> Result<ProfileSolution> {
    if candidates.is_empty() {
        return Err(CutError::NoCandidate);
    }

    let mut lengths = demand.lengths();
    sort_descending(&mut lengths);

    let results = evaluate_candidates(&lengths, candidates, cutting_gap);
    let Some(best) = select_best(&results, method) else {
        return Err(CutError::InfeasibleItem {
            profile_code: demand.profile_code.clone(),
            length: lengths.first().copied().unwrap_or_default(),
            cutting_gap,
            longest_stock: candidates.iter().copied().fold(f64::MIN, f64::max),
        });
    };

    let patterns: Vec<Pattern> = best
        .bars
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, bar)| Pattern::from_bar(&demand.profile_code, i + 1, best.stock_length, bar))
        .collect();
    let assignments = assign_items(&demand.items, &patterns);
    let summary = summarize(&demand.profile_code, &demand.items, &patterns, cutting_gap);

    Ok(ProfileSolution {
        profile_code: demand.profile_code.clone(),
        stock_length: best.stock_length,
        efficiency: best.efficiency,
        patterns,
        summary,
        assignments,
    })
}

/// Runs first-fit once for a single stock length and scores the result.
pub fn evaluate_candidate(
    lengths: &[f64],
    stock_length: f64,
    cutting_gap: f64,
) -> std::result::Result<CandidateResult, Oversize> {
    let bars = generate_patterns(lengths, stock_length, cutting_gap)?;
    let total_used: f64 = bars.iter().map(|b| b.piece_total()).sum();
    let total_stock = stock_length * bars.len() as f64;
    let efficiency = if total_stock > 0.0 {
        total_used / total_stock
    } else {
        0.0
    };
    Ok(CandidateResult {
        stock_length,
        bar_count: bars.len(),
        bars,
        efficiency,
    })
}

/// Scores every candidate in order. Candidates that cannot hold the longest
/// piece are dropped.
pub fn evaluate_candidates(
    lengths: &[f64],
    candidates: &[f64],
    cutting_gap: f64,
) -> Vec<CandidateResult> {
    candidates
        .iter()
        .filter_map(|&stock_length| {
            match evaluate_candidate(lengths, stock_length, cutting_gap) {
                Ok(result) => {
                    tracing::debug!(
                        stock_length,
                        bars = result.bar_count,
                        efficiency = result.efficiency,
                        "candidate evaluated"
                    );
                    Some(result)
                }
                Err(Oversize { length }) => {
                    tracing::debug!(stock_length, length, "candidate cannot hold piece");
                    None
                }
            }
        })
        .collect()
}

/// Picks the winning candidate. Earlier candidates win every full tie.
pub fn select_best(
    results: &[CandidateResult],
    method: OptimizationMethod,
) -> Option<&CandidateResult> {
    let mut best: Option<&CandidateResult> = None;
    for r in results {
        let better = match best {
            None => true,
            Some(b) => match method {
                OptimizationMethod::MaxEfficiency => r.efficiency > b.efficiency,
                OptimizationMethod::MinBarCount => {
                    r.bar_count < b.bar_count
                        || (r.bar_count == b.bar_count && r.efficiency > b.efficiency)
                }
            },
        };
        if better {
            best = Some(r);
        }
    }
    best
}
