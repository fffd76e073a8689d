use crate::types::{DemandItem, Pattern, Summary};

/// Rounds to 4 decimal places. Applied only when building output tables.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Summary statistics for one profile's winning bars, at full precision.
///
/// Waste credits back one cutting gap per bar: a bar of `n` pieces is charged
/// `n - 1` gaps, the trailing gap being part of the offcut.
pub fn summarize(
    profile_code: &str,
    items: &[DemandItem],
    patterns: &[Pattern],
    cutting_gap: f64,
) -> Summary {
    let total_pieces = items.len();
    let total_bars_used = patterns.len();
    let total_length_needed: f64 = items.iter().map(|i| i.length).sum();
    let total_stock_length: f64 = patterns.iter().map(|p| p.stock_length).sum();
    let waste = total_stock_length
        - total_length_needed
        - cutting_gap * (total_pieces as f64 - total_bars_used as f64);

    let overall_efficiency = if total_stock_length > 0.0 {
        total_length_needed / total_stock_length
    } else {
        0.0
    };
    let average_bar_efficiency = if patterns.is_empty() {
        0.0
    } else {
        patterns.iter().map(|p| p.efficiency).sum::<f64>() / patterns.len() as f64
    };

    Summary {
        profile_code: profile_code.to_string(),
        total_pieces,
        total_bars_used,
        total_length_needed,
        total_stock_length,
        waste,
        overall_efficiency,
        average_bar_efficiency,
    }
}
