//! Search specification types and the validating parser.
//!
//! Input commonly arrives as JSON with keys `filters` and `group_logic`.
//! The parser resolves every string-shaped choice (operators, logics,
//! wildcard targets) into typed variants up front, so the engine never
//! re-derives intent from strings.

use sift_core::Value;

use crate::error::{SearchError, SearchResult};

/// Match operator applied to a field's stored textual representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Substring match.
    Contains,
    /// Prefix match.
    Begins,
    /// Suffix match.
    Ends,
    /// Exact match.
    Equals,
}

impl Operator {
    /// Parse an operator keyword.
    pub fn parse(text: &str) -> SearchResult<Self> {
        match text {
            "contains" => Ok(Self::Contains),
            "begins" => Ok(Self::Begins),
            "ends" => Ok(Self::Ends),
            "equals" => Ok(Self::Equals),
            other => Err(SearchError::unsupported_operator(other)),
        }
    }

    /// Bind the filter value as a statement parameter.
    ///
    /// A null value stays null, which matches no row. LIKE wildcards in
    /// the value are not escaped; the value is a raw pattern fragment.
    pub(crate) fn bind(&self, value: &Value) -> Value {
        let Some(rendered) = value.render() else {
            return Value::Null;
        };
        match self {
            Self::Equals => value.clone(),
            Self::Contains => Value::Text(format!("%{}%", rendered)),
            Self::Begins => Value::Text(format!("{}%", rendered)),
            Self::Ends => Value::Text(format!("%{}", rendered)),
        }
    }
}

/// How a filter (or group combination) chains into the running set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainLogic {
    /// Intersection.
    And,
    /// Union.
    Or,
    /// Set difference; as the first operand, complement.
    Nand,
    /// Set difference; as the first operand, complement.
    Nor,
}

impl ChainLogic {
    /// Parse a logic keyword.
    pub fn parse(text: &str) -> SearchResult<Self> {
        match text {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "nand" => Ok(Self::Nand),
            "nor" => Ok(Self::Nor),
            other => Err(SearchError::unsupported_logic(other)),
        }
    }

    /// Whether this logic negates its operand.
    pub fn is_negating(&self) -> bool {
        matches!(self, Self::Nand | Self::Nor)
    }
}

/// A table or field target, resolved against the schema catalog once
/// before evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every eligible table, or every column of the target table.
    All,
    /// One named table or column.
    Named(String),
}

impl Target {
    fn parse(text: &str) -> Self {
        if text == "*" {
            Self::All
        } else {
            Self::Named(text.to_string())
        }
    }
}

/// One per-field filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Table target; `All` expands to every identifier-carrying table.
    pub table: Target,
    /// Field target; `All` expands to every column of the table.
    pub field: Target,
    /// Match operator.
    pub operator: Operator,
    /// Value matched against the stored textual representation.
    pub value: Value,
    /// How this filter chains into its group's running set.
    pub chain: ChainLogic,
    /// Group this filter belongs to.
    pub group: i64,
}

impl Filter {
    /// Create a filter with wildcard targets, `and` chaining, group 1.
    pub fn new(operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            table: Target::All,
            field: Target::All,
            operator,
            value: value.into(),
            chain: ChainLogic::And,
            group: 1,
        }
    }

    /// Restrict the filter to one table.
    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Target::Named(table.into());
        self
    }

    /// Restrict the filter to one field.
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Target::Named(field.into());
        self
    }

    /// Set the chain logic.
    pub fn with_chain(mut self, chain: ChainLogic) -> Self {
        self.chain = chain;
        self
    }

    /// Assign the filter to a group.
    pub fn in_group(mut self, group: i64) -> Self {
        self.group = group;
        self
    }
}

/// How a set of groups combines into the final match set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCombination {
    /// Group ids unioned into this combination's subset.
    pub groups: Vec<i64>,
    /// How the subset folds against the other combinations.
    pub logic: ChainLogic,
}

/// A whole search: ordered filters plus group combinations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSpec {
    pub filters: Vec<Filter>,
    pub combinations: Vec<GroupCombination>,
}

impl SearchSpec {
    /// Create a spec from filters, with default group combination.
    pub fn with_filters(filters: Vec<Filter>) -> Self {
        Self {
            filters,
            combinations: Vec::new(),
        }
    }

    /// Parse a specification from JSON text.
    pub fn from_json(text: &str) -> SearchResult<Self> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| SearchError::malformed(e.to_string()))?;
        Self::from_value(&json)
    }

    /// Parse a specification from a JSON value.
    pub fn from_value(json: &serde_json::Value) -> SearchResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| SearchError::malformed("specification must be an object"))?;

        let raw_filters = object
            .get("filters")
            .and_then(|v| v.as_array())
            .ok_or(SearchError::MissingFilters)?;

        let mut filters = Vec::with_capacity(raw_filters.len());
        for (idx, raw) in raw_filters.iter().enumerate() {
            filters.push(parse_filter(idx + 1, raw)?);
        }

        let mut combinations = Vec::new();
        if let Some(raw_combos) = object.get("group_logic") {
            let raw_combos = raw_combos
                .as_array()
                .ok_or_else(|| SearchError::malformed("'group_logic' must be a list"))?;
            for (idx, raw) in raw_combos.iter().enumerate() {
                combinations.push(parse_combination(idx + 1, raw)?);
            }
        }

        let spec = Self {
            filters,
            combinations,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the group-coverage invariant: with combinations supplied,
    /// every filter's group must appear in at least one of them.
    pub fn validate(&self) -> SearchResult<()> {
        if self.combinations.is_empty() {
            return Ok(());
        }
        for filter in &self.filters {
            let covered = self
                .combinations
                .iter()
                .any(|c| c.groups.contains(&filter.group));
            if !covered {
                return Err(SearchError::UncoveredGroup {
                    group: filter.group,
                });
            }
        }
        Ok(())
    }
}

fn parse_filter(index: usize, json: &serde_json::Value) -> SearchResult<Filter> {
    let object = json
        .as_object()
        .ok_or_else(|| SearchError::malformed(format!("filter #{} must be an object", index)))?;

    let operator = object
        .get("operator")
        .and_then(|v| v.as_str())
        .ok_or(SearchError::MissingFilterKey {
            index,
            key: "operator",
        })?;
    let operator = Operator::parse(operator)?;

    let raw_value = object.get("value").ok_or(SearchError::MissingFilterKey {
        index,
        key: "value",
    })?;
    let value = Value::from_json(raw_value).ok_or(SearchError::InvalidValue { index })?;

    let table = parse_target(index, object, "table")?;
    let field = parse_target(index, object, "field")?;

    let chain = match object.get("logic") {
        Some(raw) => {
            let text = raw.as_str().ok_or_else(|| {
                SearchError::malformed(format!("filter #{}: 'logic' must be a string", index))
            })?;
            ChainLogic::parse(text)?
        }
        None => ChainLogic::And,
    };

    let group = match object.get("group") {
        Some(raw) => raw.as_i64().ok_or_else(|| {
            SearchError::malformed(format!("filter #{}: 'group' must be an integer", index))
        })?,
        None => 1,
    };

    Ok(Filter {
        table,
        field,
        operator,
        value,
        chain,
        group,
    })
}

fn parse_target(
    index: usize,
    object: &serde_json::Map<String, serde_json::Value>,
    key: &'static str,
) -> SearchResult<Target> {
    match object.get(key) {
        Some(raw) => {
            let text = raw.as_str().ok_or_else(|| {
                SearchError::malformed(format!("filter #{}: '{}' must be a string", index, key))
            })?;
            Ok(Target::parse(text))
        }
        None => Ok(Target::All),
    }
}

fn parse_combination(index: usize, json: &serde_json::Value) -> SearchResult<GroupCombination> {
    let object = json.as_object().ok_or_else(|| {
        SearchError::malformed(format!("group combination #{} must be an object", index))
    })?;

    let raw_groups = object
        .get("groups")
        .and_then(|v| v.as_array())
        .ok_or(SearchError::MissingCombinationKey {
            index,
            key: "groups",
        })?;
    let mut groups = Vec::with_capacity(raw_groups.len());
    for raw in raw_groups {
        let id = raw.as_i64().ok_or_else(|| {
            SearchError::malformed(format!(
                "group combination #{}: group ids must be integers",
                index
            ))
        })?;
        groups.push(id);
    }

    let logic = object
        .get("logic")
        .and_then(|v| v.as_str())
        .ok_or(SearchError::MissingCombinationKey {
            index,
            key: "logic",
        })?;
    let logic = ChainLogic::parse(logic)?;

    Ok(GroupCombination { groups, logic })
}
