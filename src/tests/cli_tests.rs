// src/tests/cli_tests.rs

use super::utils::{make_db, open_store, FakeSource};
use crate::domain::{default_properties, Property, PropertyPatch};
use crate::remote::PropertySource;
use crate::{parse_selection, run};
use serde_json::json;

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn remote_row(id: &str, status: &str) -> Property {
    Property::from_patch(
        id.to_string(),
        PropertyPatch {
            status: Some(status.to_string()),
            location: Some("Baner, Pune".to_string()),
            ..Default::default()
        },
    )
}

#[test]
fn selection_pairs_fill_the_named_facets() {
    let sel = parse_selection(&args(&["status=For Sale", "location=Baner, Pune", "bhk_type=2 BHK"]))
        .unwrap();

    assert_eq!(sel.status.as_deref(), Some("For Sale"));
    assert_eq!(sel.location.as_deref(), Some("Baner, Pune"));
    assert_eq!(sel.bhk_type.as_deref(), Some("2 BHK"));
    assert_eq!(sel.property_type, None);
}

#[test]
fn selection_rejects_unknown_facet_and_missing_equals() {
    let err = parse_selection(&args(&["price=100"])).unwrap_err();
    assert!(err.contains("unknown facet 'price'"));

    let err = parse_selection(&args(&["status"])).unwrap_err();
    assert!(err.contains("expected <facet>=<value>"));
}

#[test]
fn report_is_the_default_command() {
    let (_dir, db) = make_db();
    let store = open_store(&db);
    let source = FakeSource::Rows(vec![remote_row("r1", "For Rent")]);

    let out = run(&[], &store, Some(&source as &dyn PropertySource)).unwrap();

    assert_eq!(out["catalog_source"], "remote");
    assert_eq!(out["catalog_count"], 1);
    assert_eq!(out["catalog_filters"]["statuses"], json!(["For Rent"]));
    assert_eq!(out["local_count"], default_properties().len());
}

#[test]
fn report_rejects_extra_arguments() {
    let (_dir, db) = make_db();
    let store = open_store(&db);
    assert!(run(&args(&["report", "now"]), &store, None).is_err());
}

#[test]
fn filter_reports_matches_and_provenance() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let out = run(&args(&["filter", "status=For Rent"]), &store, None).unwrap();

    assert_eq!(out["source"], "fallback");
    let data = out["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "default-3");
}

#[test]
fn show_falls_back_when_the_catalog_fails() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let out = run(
        &args(&["show", "default-1"]),
        &store,
        Some(&FakeSource::Fails as &dyn PropertySource),
    )
    .unwrap();

    assert_eq!(out["source"], "fallback");
    assert_eq!(out["data"]["title"], "Skyline Residences");
}

#[test]
fn upsert_with_explicit_id_returns_it() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let out = run(
        &args(&["upsert", r#"{"title":"Garden Loft","status":"For Sale"}"#, "loft-1"]),
        &store,
        None,
    )
    .unwrap();

    assert_eq!(out, json!({ "id": "loft-1" }));
    let first = &store.load()[0];
    assert_eq!(first.id, "loft-1");
    assert_eq!(first.title, "Garden Loft");
}

#[test]
fn upsert_rejects_invalid_json() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let err = run(&args(&["upsert", "{title:"]), &store, None).unwrap_err();
    assert!(err.starts_with("invalid property JSON"));
    assert_eq!(store.load(), default_properties());
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let first = run(&args(&["delete", "default-1"]), &store, None).unwrap();
    let second = run(&args(&["delete", "default-1"]), &store, None).unwrap();

    assert_eq!(first, json!({ "deleted": true }));
    assert_eq!(second, json!({ "deleted": false }));
}

#[test]
fn reset_reports_persistence() {
    let (_dir, db) = make_db();
    let store = open_store(&db);
    assert!(store.delete("default-2"));

    let out = run(&args(&["reset"]), &store, None).unwrap();

    assert_eq!(out, json!({ "persisted": true }));
    assert_eq!(store.load(), default_properties());
}

#[test]
fn unknown_command_is_an_error() {
    let (_dir, db) = make_db();
    let store = open_store(&db);

    let err = run(&args(&["publish", "x"]), &store, None).unwrap_err();
    assert_eq!(err, "unrecognized command: publish x");
}
