//! Search execution.

use std::collections::BTreeMap;

use sift_core::Config;
use sift_schema::Catalog;
use sift_store::Backend;

use crate::combine;
use crate::error::SearchResult;
use crate::eval::FilterEvaluator;
use crate::result::{MatchSet, SearchOutcome};
use crate::spec::{Filter, SearchSpec};

/// Search executor.
pub struct SearchExecutor<'b> {
    backend: &'b dyn Backend,
    config: &'b Config,
}

impl<'b> SearchExecutor<'b> {
    /// Create a new executor.
    pub fn new(backend: &'b dyn Backend, config: &'b Config) -> Self {
        Self { backend, config }
    }

    /// Evaluate a whole specification.
    ///
    /// Filters are bucketed by group and folded in given order; the
    /// per-group sets then combine per the specification. An empty
    /// filter list yields an empty set, not an error.
    pub fn search(&self, spec: &SearchSpec) -> SearchResult<SearchOutcome> {
        spec.validate()?;

        let catalog = Catalog::new(self.backend, self.config);
        let evaluator = FilterEvaluator::new(self.backend, &catalog);

        let mut grouped: BTreeMap<i64, Vec<&Filter>> = BTreeMap::new();
        for filter in &spec.filters {
            grouped.entry(filter.group).or_default().push(filter);
        }

        let mut group_sets: BTreeMap<i64, MatchSet> = BTreeMap::new();
        for (group, filters) in grouped {
            let set = self.fold_group(&evaluator, &filters)?;
            tracing::debug!(group, matches = set.len(), "group folded");
            group_sets.insert(group, set);
        }

        let matches = combine::combine_groups(&group_sets, &spec.combinations);
        tracing::debug!(matches = matches.len(), "search finished");
        Ok(SearchOutcome {
            matches,
            spec: spec.clone(),
        })
    }

    /// Fold one group's filters left-to-right.
    ///
    /// The first filter seeds the running set; a leading `nand`/`nor`
    /// seeds with the complement of its matches within the target-table
    /// universe.
    fn fold_group(
        &self,
        evaluator: &FilterEvaluator<'_>,
        filters: &[&Filter],
    ) -> SearchResult<MatchSet> {
        let mut running: Option<MatchSet> = None;
        for filter in filters {
            let matches = evaluator.evaluate(filter)?;
            running = Some(match running {
                None if filter.chain.is_negating() => {
                    let universe = evaluator.universe(filter)?;
                    combine::chain(filter.chain, universe, &matches)
                }
                None => matches,
                Some(acc) => combine::chain(filter.chain, acc, &matches),
            });
        }
        Ok(running.unwrap_or_default())
    }
}
