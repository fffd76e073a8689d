use std::collections::{HashMap, VecDeque};

use crate::types::{Assignment, DemandItem, Pattern};

/// Binds every demand item of a profile to the bar that cuts it.
///
/// Items of equal length are interchangeable, so each piece of each bar, in
/// bar order, takes the earliest unassigned item with bit-identical length.
/// No tolerance is applied: lengths come straight from the demand table and
/// are never recomputed, so equal inputs stay equal.
pub fn assign_items(items: &[DemandItem], patterns: &[Pattern]) -> Vec<Assignment> {
    let mut queues: HashMap<u64, VecDeque<&DemandItem>> = HashMap::new();
    for item in items {
        queues
            .entry(item.length.to_bits())
            .or_default()
            .push_back(item);
    }

    let mut assignments = Vec::with_capacity(items.len());
    for pattern in patterns {
        for &length in &pattern.pieces {
            let Some(item) = queues
                .get_mut(&length.to_bits())
                .and_then(VecDeque::pop_front)
            else {
                tracing::warn!(
                    profile = %pattern.profile_code,
                    bar = pattern.bar_number,
                    length,
                    "piece has no matching demand item"
                );
                continue;
            };
            assignments.push(Assignment {
                profile_code: item.profile_code.clone(),
                item_id: item.item_id.clone(),
                length,
                bar_number: pattern.bar_number,
            });
        }
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn item(id: &str, length: f64) -> DemandItem {
        DemandItem {
            profile_code: "A".to_string(),
            length,
            item_id: id.to_string(),
        }
    }

    fn pattern(bar_number: usize, pieces: Vec<f64>) -> Pattern {
        Pattern::from_bar(
            "A",
            bar_number,
            6000.0,
            Bar {
                pieces,
                remaining: 0.0,
            },
        )
    }

    #[test]
    fn test_earliest_item_first() {
        let items = vec![item("A_1", 1200.0), item("A_2", 800.0), item("A_3", 1200.0)];
        let patterns = vec![pattern(1, vec![1200.0, 800.0]), pattern(2, vec![1200.0])];
        let out = assign_items(&items, &patterns);
        let pairs: Vec<(&str, usize)> = out
            .iter()
            .map(|a| (a.item_id.as_str(), a.bar_number))
            .collect();
        assert_eq!(pairs, vec![("A_1", 1), ("A_2", 1), ("A_3", 2)]);
    }

    #[test]
    fn test_exact_length_match_only() {
        let items = vec![item("A_1", 1200.0), item("A_2", 1200.0 + 1e-9)];
        let patterns = vec![pattern(1, vec![1200.0 + 1e-9, 1200.0])];
        let out = assign_items(&items, &patterns);
        assert_eq!(out[0].item_id, "A_2");
        assert_eq!(out[1].item_id, "A_1");
    }

    #[test]
    fn test_one_assignment_per_item() {
        let items: Vec<DemandItem> = (1..=5)
            .map(|i| item(&format!("A_{i}"), 1000.0))
            .collect();
        let patterns = vec![
            pattern(1, vec![1000.0, 1000.0, 1000.0]),
            pattern(2, vec![1000.0, 1000.0]),
        ];
        let out = assign_items(&items, &patterns);
        assert_eq!(out.len(), items.len());
        let mut ids: Vec<&str> = out.iter().map(|a| a.item_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
