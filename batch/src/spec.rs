//! Batch specification types and the validating parser.
//!
//! A batch arrives as a JSON object of named groups. The parser
//! discriminates every group up front — a UUID-shaped key addresses an
//! existing record, any other key names a record to create, and a value
//! carrying `type` is an explicit operation block — so the engine never
//! re-derives intent from string shapes.

use std::collections::BTreeMap;

use sift_core::{RecordId, Value};

use crate::error::{BatchError, BatchResult};

/// One row's worth of field values.
pub type FieldMap = BTreeMap<String, Value>;

/// One create/update operation on one table inside a group.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOp {
    /// Target table.
    pub table: String,
    /// Intended field values.
    pub fields: FieldMap,
}

impl ChangeOp {
    pub fn new(table: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            table: table.into(),
            fields,
        }
    }
}

/// Kind of an explicit operation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

impl OpKind {
    /// Parse an operation keyword; unknown kinds fail the batch.
    pub fn parse(group: &str, text: &str) -> BatchResult<Self> {
        match text {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(BatchError::unknown_operation_type(group, other)),
        }
    }
}

/// One discriminated batch group.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchGroup {
    /// Key was a UUID: update the record with that identifier.
    Update { id: RecordId, ops: Vec<ChangeOp> },
    /// Key was any other string: create a fresh record under it.
    Create { name: String, ops: Vec<ChangeOp> },
    /// Value carried an explicit `type` block.
    Explicit {
        name: String,
        kind: OpKind,
        table: String,
        records: Vec<FieldMap>,
    },
}

impl BatchGroup {
    /// The group's key in the input specification.
    pub fn key(&self) -> &str {
        match self {
            Self::Update { id, .. } => id.as_str(),
            Self::Create { name, .. } => name,
            Self::Explicit { name, .. } => name,
        }
    }
}

/// A whole batch: ordered named groups.
///
/// Order is kept for deterministic reporting only; no group's outcome
/// may depend on another's.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSpec {
    pub groups: Vec<BatchGroup>,
}

impl BatchSpec {
    /// Create a spec from already-discriminated groups.
    pub fn with_groups(groups: Vec<BatchGroup>) -> Self {
        Self { groups }
    }

    /// Parse a specification from JSON text.
    pub fn from_json(text: &str) -> BatchResult<Self> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| BatchError::malformed(e.to_string()))?;
        Self::from_value(&json)
    }

    /// Parse a specification from a JSON value.
    pub fn from_value(json: &serde_json::Value) -> BatchResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| BatchError::malformed("specification must be an object"))?;
        let raw_groups = object
            .get("groups")
            .and_then(|v| v.as_object())
            .ok_or_else(|| BatchError::malformed("specification must carry a 'groups' object"))?;

        let mut groups = Vec::with_capacity(raw_groups.len());
        for (key, raw) in raw_groups {
            groups.push(parse_group(key, raw)?);
        }
        Ok(Self { groups })
    }
}

fn parse_group(key: &str, json: &serde_json::Value) -> BatchResult<BatchGroup> {
    if let Some(object) = json.as_object() {
        if object.contains_key("type") {
            return parse_explicit(key, object);
        }
    }

    let raw_ops = json.as_array().ok_or_else(|| {
        BatchError::malformed(format!(
            "group '{}' must be a list of change ops or an explicit operation block",
            key
        ))
    })?;

    let mut ops = Vec::with_capacity(raw_ops.len());
    for raw in raw_ops {
        ops.push(parse_change_op(key, raw)?);
    }

    if RecordId::is_uuid(key) {
        Ok(BatchGroup::Update {
            id: key.into(),
            ops,
        })
    } else {
        Ok(BatchGroup::Create {
            name: key.to_string(),
            ops,
        })
    }
}

fn parse_explicit(
    key: &str,
    object: &serde_json::Map<String, serde_json::Value>,
) -> BatchResult<BatchGroup> {
    let kind = object
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| BatchError::malformed(format!("group '{}': 'type' must be a string", key)))?;
    let kind = OpKind::parse(key, kind)?;

    let table = object
        .get("table")
        .and_then(|v| v.as_str())
        .ok_or_else(|| BatchError::malformed(format!("group '{}' is missing 'table'", key)))?;

    let raw_records = object
        .get("records")
        .and_then(|v| v.as_array())
        .ok_or_else(|| BatchError::malformed(format!("group '{}' is missing 'records'", key)))?;

    let mut records = Vec::with_capacity(raw_records.len());
    for raw in raw_records {
        records.push(parse_fields(key, raw)?);
    }

    Ok(BatchGroup::Explicit {
        name: key.to_string(),
        kind,
        table: table.to_string(),
        records,
    })
}

fn parse_change_op(key: &str, json: &serde_json::Value) -> BatchResult<ChangeOp> {
    let object = json
        .as_object()
        .ok_or_else(|| BatchError::malformed(format!("group '{}': ops must be objects", key)))?;

    let table = object
        .get("table")
        .and_then(|v| v.as_str())
        .ok_or_else(|| BatchError::malformed(format!("group '{}': op is missing 'table'", key)))?;

    let fields = object
        .get("fields")
        .ok_or_else(|| BatchError::malformed(format!("group '{}': op is missing 'fields'", key)))?;

    Ok(ChangeOp::new(table, parse_fields(key, fields)?))
}

fn parse_fields(key: &str, json: &serde_json::Value) -> BatchResult<FieldMap> {
    let object = json
        .as_object()
        .ok_or_else(|| BatchError::malformed(format!("group '{}': fields must be an object", key)))?;

    let mut fields = FieldMap::new();
    for (name, raw) in object {
        let value = Value::from_json(raw).ok_or_else(|| {
            BatchError::malformed(format!(
                "group '{}': field '{}' has a non-scalar value",
                key, name
            ))
        })?;
        fields.insert(name.clone(), value);
    }
    Ok(fields)
}
