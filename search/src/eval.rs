//! Single-filter evaluation against the backend.

use sift_schema::{Catalog, SchemaError};
use sift_store::Backend;

use crate::error::SearchResult;
use crate::result::MatchSet;
use crate::spec::{Filter, Operator, Target};

/// Evaluates one filter at a time.
///
/// Wildcard tables expand to every identifier-carrying table; wildcard
/// fields expand to every column. One statement is issued per target
/// table, with the columns OR-ed together, and the per-table identifier
/// sets are unioned.
pub(crate) struct FilterEvaluator<'a> {
    backend: &'a dyn Backend,
    catalog: &'a Catalog<'a>,
}

impl<'a> FilterEvaluator<'a> {
    pub fn new(backend: &'a dyn Backend, catalog: &'a Catalog<'a>) -> Self {
        Self { backend, catalog }
    }

    /// Compute the filter's match set.
    pub fn evaluate(&self, filter: &Filter) -> SearchResult<MatchSet> {
        let mut matches = MatchSet::new();
        for table in self.target_tables(&filter.table)? {
            matches.extend(self.table_matches(&table, filter)?);
        }
        tracing::debug!(matches = matches.len(), "filter evaluated");
        Ok(matches)
    }

    /// All identifiers in the filter's target tables.
    ///
    /// The complement universe for a leading negated filter.
    pub fn universe(&self, filter: &Filter) -> SearchResult<MatchSet> {
        let mut universe = MatchSet::new();
        for table in self.target_tables(&filter.table)? {
            let sql = format!(
                "SELECT {} FROM {}",
                self.backend.quote_ident(self.catalog.identifier_column()),
                self.backend.quote_ident(&table),
            );
            collect_ids(&mut universe, self.backend.query_rows(&sql, &[])?);
        }
        Ok(universe)
    }

    /// Resolve a table target.
    ///
    /// A named table must carry the identifier column; wildcard expansion
    /// silently excludes non-conforming tables.
    fn target_tables(&self, target: &Target) -> SearchResult<Vec<String>> {
        match target {
            Target::All => Ok(self.catalog.identifier_tables()?),
            Target::Named(table) => {
                self.catalog.require_identifier(table)?;
                Ok(vec![table.clone()])
            }
        }
    }

    fn table_matches(&self, table: &str, filter: &Filter) -> SearchResult<MatchSet> {
        let columns = self.catalog.columns(table)?;
        let targets: Vec<String> = match &filter.field {
            Target::All => columns,
            Target::Named(field) => {
                if !columns.contains(field) {
                    return Err(SchemaError::unknown_column(table, field).into());
                }
                vec![field.clone()]
            }
        };

        let mut clauses = Vec::with_capacity(targets.len());
        let mut params = Vec::with_capacity(targets.len());
        for column in &targets {
            let placeholder = self.backend.placeholder(params.len() + 1);
            let column = self.backend.quote_ident(column);
            match filter.operator {
                Operator::Equals => {
                    clauses.push(format!("{} = {}", column, placeholder));
                }
                _ => clauses.push(format!("{} LIKE {}", column, placeholder)),
            }
            params.push(filter.operator.bind(&filter.value));
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            self.backend.quote_ident(self.catalog.identifier_column()),
            self.backend.quote_ident(table),
        );
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" OR "));
        }

        let mut matches = MatchSet::new();
        collect_ids(&mut matches, self.backend.query_rows(&sql, &params)?);
        Ok(matches)
    }
}

/// Collect first-column identifiers, skipping null rows.
fn collect_ids(set: &mut MatchSet, rows: Vec<sift_store::Row>) {
    for row in rows {
        if let Some((_, value)) = row.into_iter().next() {
            if let Some(id) = value.render() {
                set.insert(id.into());
            }
        }
    }
}
