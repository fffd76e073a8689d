use std::collections::HashMap;

use crate::types::{DemandItem, DemandLine};

/// Demand items of one profile code, in expansion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDemand {
    pub profile_code: String,
    pub items: Vec<DemandItem>,
}

impl ProfileDemand {
    pub fn lengths(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.length).collect()
    }
}

/// Expands every line into `floor(quantity)` unit items.
///
/// Item ids are `<profile>_<n>` with `n` counting from 1 across all lines of
/// the same profile, so ids stay unique when a profile spans several rows.
/// A quantity below 1 yields no items.
pub fn expand_demand(lines: &[DemandLine]) -> Vec<DemandItem> {
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut items = Vec::new();

    for line in lines {
        let count = line.quantity.floor().max(0.0) as usize;
        let seq = counters.entry(line.profile_code.as_str()).or_insert(0);
        for _ in 0..count {
            *seq += 1;
            items.push(DemandItem {
                profile_code: line.profile_code.clone(),
                length: line.length,
                item_id: format!("{}_{}", line.profile_code, seq),
            });
        }
    }
    items
}

/// Splits items by profile code, profiles in order of first appearance.
pub fn group_by_profile(items: Vec<DemandItem>) -> Vec<ProfileDemand> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ProfileDemand> = Vec::new();

    for item in items {
        let gi = *index.entry(item.profile_code.clone()).or_insert_with(|| {
            groups.push(ProfileDemand {
                profile_code: item.profile_code.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[gi].items.push(item);
    }
    groups
}
