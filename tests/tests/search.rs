//! Search integration tests.
//!
//! Boolean set algebra across filters and groups, wildcard expansion,
//! and search-side error propagation.

use sift_tests::prelude::*;

fn ticket_db() -> TestDb {
    let db = TestDb::new();
    db.create_table("notes", &["body", "title"])
        .insert(
            "notes",
            &[
                ("record_uuid", "u1"),
                ("body", "ticket -GH-42 opened"),
                ("title", "alpha"),
            ],
        )
        .insert(
            "notes",
            &[("record_uuid", "u2"), ("body", "no ticket"), ("title", "beta")],
        )
        .insert(
            "notes",
            &[("record_uuid", "u3"), ("body", "spam"), ("title", "gamma")],
        );
    db
}

#[test]
fn test_concrete_contains_scenario() {
    // GIVEN - the Notes table with an `id` identifier column
    let db = TestDb::with_config(Config::new("id"));
    db.create_table("Notes", &["body"])
        .insert("Notes", &[("id", "u1"), ("body", "ticket -GH-42 opened")])
        .insert("Notes", &[("id", "u2"), ("body", "no ticket")]);

    // WHEN
    let outcome = db
        .session()
        .search_json(
            r#"{"filters": [{
                "table": "Notes", "field": "body",
                "operator": "contains", "value": "-GH-",
                "logic": "and", "group": 1
            }]}"#,
        )
        .unwrap();

    // THEN
    assert_eq!(outcome.ids(), vec!["u1"]);
}

#[test]
fn test_empty_filter_list_yields_empty_set() {
    // GIVEN
    let db = ticket_db();

    // WHEN
    let outcome = db.session().search(&SearchSpec::default()).unwrap();

    // THEN - empty, not an error
    assert!(outcome.is_empty());
}

#[test]
fn test_sole_leading_nand_yields_complement() {
    // GIVEN
    let db = ticket_db();
    let spec = SearchSpec::with_filters(vec![
        Filter::new(Operator::Contains, "ticket")
            .on_table("notes")
            .on_field("body")
            .with_chain(ChainLogic::Nand),
    ]);

    // WHEN
    let outcome = db.session().search(&spec).unwrap();

    // THEN - everything except the matches within the table universe
    assert_eq!(outcome.ids(), vec!["u3"]);
}

#[test]
fn test_and_group_combination_is_commutative() {
    // GIVEN - group 1 matches ticket rows, group 2 matches -GH- rows
    let db = ticket_db();
    let filters = vec![
        Filter::new(Operator::Contains, "ticket")
            .on_table("notes")
            .on_field("body")
            .in_group(1),
        Filter::new(Operator::Contains, "-GH-")
            .on_table("notes")
            .on_field("body")
            .in_group(2),
    ];
    let forward = SearchSpec {
        filters: filters.clone(),
        combinations: vec![
            GroupCombination { groups: vec![1], logic: ChainLogic::And },
            GroupCombination { groups: vec![2], logic: ChainLogic::And },
        ],
    };
    let backward = SearchSpec {
        filters,
        combinations: vec![
            GroupCombination { groups: vec![2], logic: ChainLogic::And },
            GroupCombination { groups: vec![1], logic: ChainLogic::And },
        ],
    };

    // WHEN
    let a = db.session().search(&forward).unwrap();
    let b = db.session().search(&backward).unwrap();

    // THEN
    assert_eq!(a.matches, b.matches);
    assert_eq!(a.ids(), vec!["u1"]);
}

#[test]
fn test_nand_group_combination_is_order_dependent() {
    // GIVEN
    let db = ticket_db();
    let filters = vec![
        Filter::new(Operator::Contains, "ticket")
            .on_table("notes")
            .on_field("body")
            .in_group(1),
        Filter::new(Operator::Contains, "-GH-")
            .on_table("notes")
            .on_field("body")
            .in_group(2),
    ];
    let forward = SearchSpec {
        filters: filters.clone(),
        combinations: vec![
            GroupCombination { groups: vec![1], logic: ChainLogic::And },
            GroupCombination { groups: vec![2], logic: ChainLogic::Nand },
        ],
    };
    let backward = SearchSpec {
        filters,
        combinations: vec![
            GroupCombination { groups: vec![2], logic: ChainLogic::Nand },
            GroupCombination { groups: vec![1], logic: ChainLogic::Nand },
        ],
    };

    // WHEN
    let a = db.session().search(&forward).unwrap();
    let b = db.session().search(&backward).unwrap();

    // THEN - left-associative difference flips with the order
    assert_eq!(a.ids(), vec!["u2"]);
    assert!(b.is_empty());
    assert_ne!(a.matches, b.matches);
}

#[test]
fn test_or_chain_within_group() {
    // GIVEN
    let db = ticket_db();
    let spec = SearchSpec::with_filters(vec![
        Filter::new(Operator::Equals, "spam")
            .on_table("notes")
            .on_field("body"),
        Filter::new(Operator::Equals, "alpha")
            .on_table("notes")
            .on_field("title")
            .with_chain(ChainLogic::Or),
    ]);

    // WHEN
    let outcome = db.session().search(&spec).unwrap();

    // THEN
    assert_eq!(outcome.ids(), vec!["u1", "u3"]);
}

#[test]
fn test_wildcard_table_unions_identifier_sets() {
    // GIVEN - two conforming tables plus one without the identifier
    let db = TestDb::new();
    db.create_table("notes", &["body"])
        .insert("notes", &[("record_uuid", "n1"), ("body", "shared-term")]);
    db.create_table("memos", &["text"])
        .insert("memos", &[("record_uuid", "m1"), ("text", "shared-term")]);
    db.session()
        .backend()
        .execute_batch("CREATE TABLE plain (name TEXT PRIMARY KEY); INSERT INTO plain VALUES ('shared-term')")
        .unwrap();

    // WHEN
    let outcome = db
        .session()
        .search(&SearchSpec::with_filters(vec![Filter::new(
            Operator::Contains,
            "shared-term",
        )]))
        .unwrap();

    // THEN - plain lacks record_uuid and is silently excluded
    assert_eq!(outcome.ids(), vec!["m1", "n1"]);
}

#[test]
fn test_search_is_idempotent_against_unchanged_backend() {
    // GIVEN
    let db = ticket_db();
    let spec = SearchSpec::with_filters(vec![
        Filter::new(Operator::Contains, "ticket")
            .on_table("notes")
            .on_field("body"),
    ]);

    // WHEN
    let first = db.session().search(&spec).unwrap();
    let second = db.session().search(&spec).unwrap();

    // THEN
    assert_eq!(first.matches, second.matches);
}

#[test]
fn test_unknown_table_aborts_search() {
    // GIVEN
    let db = ticket_db();
    let spec = SearchSpec::with_filters(vec![
        Filter::new(Operator::Contains, "x").on_table("missing"),
    ]);

    // WHEN
    let result = db.session().search(&spec);

    // THEN - no partial results
    assert!(matches!(
        result,
        Err(SessionError::Search(SearchError::Schema(_)))
    ));
}

#[test]
fn test_outcome_keeps_spec_for_provenance() {
    // GIVEN
    let db = ticket_db();
    let spec = SearchSpec::with_filters(vec![
        Filter::new(Operator::Contains, "ticket")
            .on_table("notes")
            .on_field("body"),
    ]);

    // WHEN
    let outcome = db.session().search(&spec).unwrap();

    // THEN
    assert_eq!(outcome.spec, spec);
}
