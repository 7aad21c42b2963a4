//! Boolean set algebra for filter chains and group combinations.

use std::collections::BTreeMap;

use crate::result::MatchSet;
use crate::spec::{ChainLogic, GroupCombination};

/// Fold one operand into the running set.
///
/// `and` intersects, `or` unions, `nand`/`nor` subtract the operand.
pub(crate) fn chain(logic: ChainLogic, running: MatchSet, next: &MatchSet) -> MatchSet {
    match logic {
        ChainLogic::And => running.intersection(next).cloned().collect(),
        ChainLogic::Or => running.union(next).cloned().collect(),
        ChainLogic::Nand | ChainLogic::Nor => running.difference(next).cloned().collect(),
    }
}

/// Combine per-group match sets into the final set.
///
/// With no combinations supplied, all groups intersect in ascending
/// group-id order. Otherwise each combination unions its listed groups
/// into a subset, and the subsets fold left-to-right by each entry's
/// logic. The first entry seeds the fold; a combination naming an absent
/// group contributes nothing for it.
pub(crate) fn combine_groups(
    group_sets: &BTreeMap<i64, MatchSet>,
    combinations: &[GroupCombination],
) -> MatchSet {
    if combinations.is_empty() {
        let mut sets = group_sets.values();
        let Some(first) = sets.next() else {
            return MatchSet::new();
        };
        return sets.fold(first.clone(), |acc, set| chain(ChainLogic::And, acc, set));
    }

    let mut running: Option<MatchSet> = None;
    for combination in combinations {
        let mut subset = MatchSet::new();
        for group in &combination.groups {
            if let Some(set) = group_sets.get(group) {
                subset.extend(set.iter().cloned());
            }
        }
        running = Some(match running {
            None => subset,
            Some(acc) => chain(combination.logic, acc, &subset),
        });
    }
    running.unwrap_or_default()
}
