//! Audit trail integration tests.
//!
//! Every field touch journals exactly one entry, tagged with its batch.

use sift_tests::prelude::*;

fn people_db() -> TestDb {
    let db = TestDb::new();
    db.create_table("people", &["name", "age"]);
    db
}

#[test]
fn test_update_audits_only_changed_fields() {
    // GIVEN - name changes, age is listed but unchanged
    let db = people_db();
    db.insert(
        "people",
        &[("record_uuid", "p1"), ("name", "Alice"), ("age", "30")],
    );
    let spec = BatchSpec::from_json(
        r#"{"groups": {"touch": {
            "type": "update", "table": "people",
            "records": [{"record_uuid": "p1", "name": "Bob", "age": "30"}]
        }}}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();

    // THEN - exactly one entry, for name only
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.field, "name");
    assert_eq!(entry.old_value.as_deref(), Some("Alice"));
    assert_eq!(entry.new_value.as_deref(), Some("Bob"));
}

#[test]
fn test_create_audits_every_field_with_no_old_value() {
    // GIVEN
    let db = people_db();
    let spec = BatchSpec::from_json(
        r#"{"groups": {"fresh": [
            {"table": "people", "fields": {"name": "Carol", "age": "41"}}
        ]}}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();

    // THEN - name, age, and the stamped identifier
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.old_value.is_none()));
    assert!(entries.iter().any(|e| e.field == "name" && e.new_value.as_deref() == Some("Carol")));
    assert!(entries.iter().any(|e| e.field == "record_uuid"));
}

#[test]
fn test_delete_audits_every_original_field() {
    // GIVEN
    let db = people_db();
    db.insert(
        "people",
        &[("record_uuid", "p1"), ("name", "Dave"), ("age", "52")],
    );
    let spec = BatchSpec::from_json(
        r#"{"groups": {"purge": {
            "type": "delete", "table": "people",
            "records": [{"record_uuid": "p1"}]
        }}}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();

    // THEN - one entry per original field, all with no new value
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.new_value.is_none()));
    assert!(entries.iter().any(|e| e.field == "name" && e.old_value.as_deref() == Some("Dave")));
}

#[test]
fn test_delete_of_missing_record_warns_and_continues() {
    // GIVEN
    let db = people_db();
    db.insert(
        "people",
        &[("record_uuid", "p1"), ("name", "Erin"), ("age", "28")],
    );
    let spec = BatchSpec::from_json(
        r#"{"groups": {"purge": {
            "type": "delete", "table": "people",
            "records": [{"record_uuid": "ghost"}, {"record_uuid": "p1"}]
        }}}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();

    // THEN - warning collected, present record still deleted and audited
    assert_eq!(
        outcome.warnings,
        vec![BatchWarning::DeleteTargetNotFound {
            table: "people".to_string(),
            id: RecordId::from("ghost"),
        }]
    );
    assert_eq!(outcome.deleted, vec![RecordId::from("p1")]);
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
fn test_entries_share_the_batch_id() {
    // GIVEN
    let db = people_db();
    db.insert(
        "people",
        &[("record_uuid", "p1"), ("name", "Faye"), ("age", "33")],
    );
    let spec = BatchSpec::from_json(
        r#"{"groups": {
            "fresh": [{"table": "people", "fields": {"name": "Gus"}}],
            "touch": {
                "type": "update", "table": "people",
                "records": [{"record_uuid": "p1", "name": "Fay"}]
            }
        }}"#,
    )
    .unwrap();

    // WHEN
    let outcome = db.session().apply(&spec).unwrap();
    let entries = db.session().audit_entries(&outcome.batch_id).unwrap();

    // THEN - every entry of the batch carries its id
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e.batch_id == outcome.batch_id));
}
