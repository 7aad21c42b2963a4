//! Batch atomicity integration tests.
//!
//! A batch either commits whole or leaves no trace: no partial rows, no
//! partial audit entries, no partial outcome.

use sift_tests::prelude::*;

fn notes_db() -> TestDb {
    let db = TestDb::new();
    db.create_table("notes", &["body"]);
    db
}

#[test]
fn test_failing_update_rolls_back_valid_create() {
    // GIVEN - one valid create and one update of a missing identifier
    let db = notes_db();
    let spec = BatchSpec::from_json(
        r#"{"groups": {
            "fresh": [{"table": "notes", "fields": {"body": "hello"}}],
            "touch": {
                "type": "update", "table": "notes",
                "records": [{"record_uuid": "ghost", "body": "nope"}]
            }
        }}"#,
    )
    .unwrap();

    // WHEN
    let result = db.session().apply(&spec);

    // THEN - zero net rows created, zero audit entries persisted
    assert!(result.is_err());
    assert_eq!(db.row_count("notes"), 0);
    assert_eq!(db.row_count("field_log"), 0);
}

#[test]
fn test_failing_group_undoes_earlier_deletes() {
    // GIVEN - typed groups so the delete provably applies first
    let db = notes_db();
    db.insert("notes", &[("record_uuid", "u1"), ("body", "keep me")]);
    let mut target = std::collections::BTreeMap::new();
    target.insert("record_uuid".to_string(), Value::from("u1"));
    let mut bogus = std::collections::BTreeMap::new();
    bogus.insert("bogus".to_string(), Value::from("x"));
    let spec = BatchSpec::with_groups(vec![
        BatchGroup::Explicit {
            name: "purge".to_string(),
            kind: OpKind::Delete,
            table: "notes".to_string(),
            records: vec![target],
        },
        BatchGroup::Create {
            name: "broken".to_string(),
            ops: vec![ChangeOp::new("notes", bogus)],
        },
    ]);

    // WHEN
    let result = db.session().apply(&spec);

    // THEN - the deleted row is back
    assert!(result.is_err());
    assert_eq!(db.row_count("notes"), 1);
    assert_eq!(db.field_of("notes", "u1", "body").as_deref(), Some("keep me"));
}

#[test]
fn test_successful_batch_commits_durably() {
    // GIVEN
    let db = notes_db();
    let spec = BatchSpec::from_json(
        r#"{"groups": {"fresh": [{"table": "notes", "fields": {"body": "stays"}}]}}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();

    // THEN - row and audit entries both persisted
    assert_eq!(db.row_count("notes"), 1);
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_warnings_do_not_abort_the_batch() {
    // GIVEN - a missing delete target alongside a valid create
    let db = notes_db();
    let spec = BatchSpec::from_json(
        r#"{"groups": {
            "purge": {
                "type": "delete", "table": "notes",
                "records": [{"record_uuid": "ghost"}]
            },
            "fresh": [{"table": "notes", "fields": {"body": "made it"}}]
        }}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();

    // THEN - batch committed, warning reported
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(db.row_count("notes"), 1);
}
